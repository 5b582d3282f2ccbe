//! Batch generation for voxcache.
//!
//! A batch run reconciles a phrase corpus against the asset store, then
//! generates every missing asset through the shared
//! [`GenerationOrchestrator`](voxcache_core::GenerationOrchestrator) with a
//! bounded pool of workers. Failures of individual phrases are collected
//! into the [`BatchSummary`]; only an unreachable provider or an unreadable
//! corpus aborts a run.
//!
//! # Modules
//!
//! - `config` - worker count, voice and dry-run switch
//! - `job` - one phrase to generate and its outcome
//! - `progress` - snapshots published over a `watch` channel
//! - `runner` - the worker pool
//! - `summary` - per-run totals

mod config;
mod error;
mod job;
mod progress;
mod runner;
mod summary;

pub use config::BatchConfig;
pub use error::BatchError;
pub use job::{FailedItem, GenerationJob, ItemOutcome};
pub use progress::BatchProgress;
pub use runner::BatchRunner;
pub use summary::{AttemptCounts, BatchSummary};

// Cancellation is part of the runner API.
pub use tokio_util::sync::CancellationToken;
