//! Batch run summary.
//!
//! A run starts with a reconciliation and ends when every planned job has
//! finished or cancellation stopped new work. The summary accumulates
//! per-category counts and the failed items, in corpus order.

use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::{FailedItem, ItemOutcome, JobResult};

/// Counts of attempts by result kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptCounts {
    pub generated: usize,
    pub already_present: usize,
    pub failed: usize,
}

impl AttemptCounts {
    /// Add one outcome.
    pub fn add(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Generated => self.generated += 1,
            ItemOutcome::AlreadyPresent => self.already_present += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }

    /// Jobs that reached an outcome.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.generated + self.already_present + self.failed
    }
}

/// Final result of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Unique ID for this run.
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Expected assets according to the initial reconciliation.
    pub expected: usize,
    /// Assets already present before the run.
    pub found_before: usize,
    /// Jobs planned (the initial misses).
    pub planned: usize,
    pub totals: AttemptCounts,
    pub per_category: IndexMap<String, AttemptCounts>,
    /// Failed items in corpus order.
    pub failed: Vec<FailedItem>,
    /// Planned jobs never started because the run was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
    pub dry_run: bool,
}

impl BatchSummary {
    /// Whether every planned job ended with the asset in the store.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.cancelled && self.totals.failed == 0 && self.skipped == 0
    }
}

/// Accumulates job results into a summary.
#[derive(Debug)]
pub(crate) struct SummaryBuilder {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    expected: usize,
    found_before: usize,
    planned: usize,
    totals: AttemptCounts,
    per_category: IndexMap<String, AttemptCounts>,
    failed: Vec<(usize, FailedItem)>,
}

impl SummaryBuilder {
    pub fn new(run_id: Uuid, expected: usize, found_before: usize, planned: usize) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            expected,
            found_before,
            planned,
            totals: AttemptCounts::default(),
            per_category: IndexMap::new(),
            failed: Vec::new(),
        }
    }

    /// Pre-register categories so per-category output follows corpus order.
    pub fn category(&mut self, category: &str) {
        self.per_category.entry(category.to_string()).or_default();
    }

    pub fn record(&mut self, result: JobResult) {
        self.totals.add(result.outcome);
        self.per_category
            .entry(result.job.category.clone())
            .or_default()
            .add(result.outcome);

        if result.outcome == ItemOutcome::Failed {
            self.failed.push((
                result.job.index,
                FailedItem {
                    category: result.job.category,
                    language: result.job.language,
                    phrase: result.job.phrase,
                    error: result.error.unwrap_or_default(),
                },
            ));
        }
    }

    pub fn finish(mut self, elapsed: Duration, cancelled: bool, dry_run: bool) -> BatchSummary {
        self.failed.sort_by_key(|(index, _)| *index);
        let attempted = self.totals.attempted();
        BatchSummary {
            run_id: self.run_id,
            started_at: self.started_at,
            elapsed,
            expected: self.expected,
            found_before: self.found_before,
            planned: self.planned,
            totals: self.totals,
            per_category: self.per_category,
            failed: self.failed.into_iter().map(|(_, item)| item).collect(),
            skipped: if dry_run {
                0
            } else {
                self.planned.saturating_sub(attempted)
            },
            cancelled,
            dry_run,
        }
    }
}
