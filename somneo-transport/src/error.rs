//! Error types for the device transport

use thiserror::Error;

/// Errors that can occur while talking to the device's REST API
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request exceeded the configured deadline. Never retried.
    #[error("Request timed out")]
    Timeout,

    /// The connection could not be established, even after retrying
    #[error("Connection failed after {attempts} attempt(s): {message}")]
    ConnectionFailure { attempts: u32, message: String },

    /// Any other request-level failure
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The device rejected the request with HTTP 422
    #[error("Invalid request: {body}")]
    InvalidRequest { body: String },

    /// The response body was not valid JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The relative path could not be joined onto the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Whether the failure happened before the device answered
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout
                | TransportError::ConnectionFailure { .. }
                | TransportError::RequestFailed(_)
        )
    }
}

impl From<url::ParseError> for TransportError {
    fn from(error: url::ParseError) -> Self {
        TransportError::InvalidUrl(error.to_string())
    }
}
