//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They use only domain types; no HTTP client types appear in signatures.

mod provider;

pub use provider::{ProviderError, SpeechProvider};

#[cfg(test)]
pub use provider::MockSpeechProvider;
