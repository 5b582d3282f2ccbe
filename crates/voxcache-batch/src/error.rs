//! Batch run errors.
//!
//! Only conditions that stop a whole run live here. Per-item failures are
//! data in the [`BatchSummary`](crate::BatchSummary).

use thiserror::Error;
use voxcache_core::{CorpusError, ProviderError};

/// Errors that abort a batch run before any item is attempted.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The connectivity probe failed.
    #[error("speech provider unavailable: {0}")]
    ProviderUnavailable(ProviderError),

    /// The corpus could not be loaded.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl BatchError {
    /// Whether the run failed because the provider was unreachable.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}
