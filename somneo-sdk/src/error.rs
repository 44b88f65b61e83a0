use somneo_api::{AlarmId, ApiError, Endpoint};
use somneo_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Alarm not found: {0}")]
    AlarmNotFound(AlarmId),

    #[error("No cached {0} state, refresh first")]
    NotLoaded(Endpoint),

    #[error("Unexpected {endpoint} response: {message}")]
    UnexpectedResponse { endpoint: Endpoint, message: String },
}

impl SdkError {
    /// The device did not answer within the request deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, SdkError::Transport(TransportError::Timeout))
    }

    /// The device rejected the request (HTTP 422)
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, SdkError::Transport(TransportError::InvalidRequest { .. }))
    }

    /// An unknown curve, sound or pattern name was supplied
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, SdkError::Api(ApiError::UnknownName { .. }))
    }

    /// Device data contradicts itself or refers to a slot that does not exist
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            SdkError::Api(ApiError::DataIntegrity(_)) | SdkError::AlarmNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
