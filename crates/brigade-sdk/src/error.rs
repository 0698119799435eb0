//! Error types for Brigade API calls.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the Brigade API server.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API server responded {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to decode API response: {0}")]
    Decode(String),
}
