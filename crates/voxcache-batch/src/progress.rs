//! Batch progress snapshots.

use serde::Serialize;

use crate::job::ItemOutcome;

/// Progress published through a `watch` channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Jobs planned for this run.
    pub total: usize,
    /// Jobs finished, whatever the outcome.
    pub completed: usize,
    pub generated: usize,
    pub already_present: usize,
    pub failed: usize,
    /// Monotonically increasing sequence number for change detection.
    pub seq: u64,
}

impl BatchProgress {
    /// Fresh progress for `total` jobs.
    #[must_use]
    pub fn started(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Fold one outcome in.
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.completed += 1;
        self.seq += 1;
        match outcome {
            ItemOutcome::Generated => self.generated += 1,
            ItemOutcome::AlreadyPresent => self.already_present += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }

    /// Whether every planned job has finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}
