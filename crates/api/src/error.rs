//! Errors raised at the API boundary.

use thiserror::Error;

use crate::envelope::ApiResponse;

/// Result of an API call: an envelope, or a transport-level failure.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Failures that happen *around* the envelope rather than inside it.
///
/// The simulator never raises these; a real HTTP client will. Callers treat
/// them exactly like an unsuccessful envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded into an envelope.
    #[error("decode error: {0}")]
    Decode(String),

    /// A well-formed envelope reported failure where data was required.
    #[error("request unsuccessful: {0}")]
    Unsuccessful(String),
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn unsuccessful(msg: impl Into<String>) -> Self {
        Self::Unsuccessful(msg.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
