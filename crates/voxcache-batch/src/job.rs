//! Generation jobs and their per-item outcomes.

use serde::{Deserialize, Serialize};
use voxcache_core::{CacheKey, Language, MissingAsset};

/// One phrase to generate. A value type; workers own their job.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    /// Position in corpus order, used to keep summaries ordered.
    pub index: usize,
    pub category: String,
    pub language: Language,
    pub phrase: String,
    pub key: CacheKey,
}

impl GenerationJob {
    /// Build a job from a reconciliation miss.
    #[must_use]
    pub fn from_missing(index: usize, missing: MissingAsset) -> Self {
        Self {
            index,
            category: missing.category,
            language: missing.language,
            phrase: missing.phrase,
            key: missing.key,
        }
    }
}

/// Result kind for one job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Synthesized and committed by this run.
    Generated,
    /// Appeared in the store before this run reached it.
    AlreadyPresent,
    /// Provider or store failure.
    Failed,
}

/// A job that failed, with its cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    pub category: String,
    pub language: Language,
    pub phrase: String,
    pub error: String,
}

/// What a worker reports back for one job.
#[derive(Debug)]
pub(crate) struct JobResult {
    pub job: GenerationJob,
    pub outcome: ItemOutcome,
    pub error: Option<String>,
}
