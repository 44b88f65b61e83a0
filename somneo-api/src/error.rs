use thiserror::Error;

/// Errors raised while building or interpreting device payloads
///
/// None of these involve the network: they are caught before a request is
/// sent or while decoding a response the transport already received.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// A curve, sound, source or pattern name that the device does not know
    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// The device returned data that contradicts itself
    ///
    /// This covers mismatched alarm array lengths and out-of-range times.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Invalid parameter value
    ///
    /// Light level out of 0-25, curve duration out of 5-40 minutes, etc.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A response could not be decoded into the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ApiError {
    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Self::UnknownName {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn out_of_range(parameter: &str, value: u32, min: u32, max: u32) -> Self {
        Self::InvalidParameter(format!(
            "Parameter '{}' value {} is out of range [{}, {}]",
            parameter, value, min, max
        ))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
