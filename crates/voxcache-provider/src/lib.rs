//! HTTP speech-synthesis adapter for voxcache.
//!
//! Implements the core `SpeechProvider` port by posting
//! `{text, language, voice, rate}` to a synthesis service and returning the
//! audio bytes it answers with. Voices come from an explicit
//! [`VoiceCatalog`] passed in at construction.
//!
//! ```no_run
//! use voxcache_provider::{DefaultSpeechProvider, HttpProviderConfig, VoiceCatalog};
//!
//! let provider = DefaultSpeechProvider::new(
//!     &HttpProviderConfig::new().with_endpoint("http://127.0.0.1:5050/synthesize"),
//!     VoiceCatalog::standard(),
//! )?;
//! # Ok::<(), voxcache_core::ProviderError>(())
//! ```

#![deny(unsafe_code)]
// HttpSpeechProvider is generic over the crate-private HttpBackend; callers
// use DefaultSpeechProvider through the SpeechProvider port.
#![allow(private_bounds)]

mod catalog;
mod config;
mod error;
mod http;
mod provider;

// ============================================================================
// Public API
// ============================================================================

// Provider
pub use provider::{DefaultSpeechProvider, HttpSpeechProvider};

// Configuration
pub use catalog::{VoiceCatalog, VoiceEntry};
pub use config::HttpProviderConfig;
