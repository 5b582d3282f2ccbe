//! Speech provider port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Language, VoiceParams};

/// Errors from a speech provider.
///
/// Adapter-specific failures (HTTP, TLS, decoding) are mapped onto these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The service rejected or failed the request.
    #[error("Speech service error: {message}")]
    Service {
        /// Description of the failure
        message: String,
        /// HTTP status, when the failure came from a response
        status: Option<u16>,
    },

    /// The service answered successfully but with no audio.
    #[error("Speech service returned no audio")]
    EmptyAudio,

    /// The service cannot be reached at all.
    #[error("Speech service unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity failure
        message: String,
    },
}

impl ProviderError {
    /// Create a service error without a status.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            status: None,
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Whether this is a connectivity failure rather than a per-request one.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Port trait for text-to-speech synthesis.
///
/// The implementation lives in `voxcache-provider`. Calls are network-bound
/// and may be slow; callers are expected to bound concurrency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` and return the encoded audio (MP3).
    ///
    /// `text` is already normalized. Voice parameters are passed through as
    /// supplied; picking a concrete voice is up to the implementation.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: &VoiceParams,
    ) -> Result<Vec<u8>, ProviderError>;

    /// Check that the service is reachable. Called once before a batch.
    async fn check_connectivity(&self) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_distinguished() {
        assert!(ProviderError::unavailable("dns").is_unavailable());
        assert!(!ProviderError::service("500").is_unavailable());
        assert!(!ProviderError::EmptyAudio.is_unavailable());
    }

    #[test]
    fn error_display() {
        let err = ProviderError::Service {
            message: "quota exceeded".to_string(),
            status: Some(429),
        };
        assert!(err.to_string().contains("quota exceeded"));
    }
}
