//! Internal error types for HTTP provider operations.
//!
//! These errors are internal to `voxcache-provider` and are mapped to the
//! core port error at the boundary.

use thiserror::Error;
use voxcache_core::ProviderError;

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors from the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Could not reach the server at all.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<HttpError> for ProviderError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, .. } => Self::Service {
                message: err.to_string(),
                status: Some(status),
            },
            HttpError::Connect(message) => Self::Unavailable { message },
            HttpError::Network(ref e) if e.is_connect() || e.is_timeout() => Self::Unavailable {
                message: err.to_string(),
            },
            HttpError::Network(_) | HttpError::InvalidUrl(_) => Self::service(err.to_string()),
        }
    }
}
