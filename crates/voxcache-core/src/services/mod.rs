//! Core services - the cache's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces), the store and the
//! domain logic. They don't know about concrete provider implementations.

mod key_lock;
mod orchestrator;
mod reconciliation;
mod report;

pub use key_lock::{KeyGuard, KeyLockTable};
pub use orchestrator::{EnsureError, EnsureOutcome, GenerationOrchestrator};
pub use reconciliation::ReconciliationEngine;
pub use report::{
    CategoryTally, InvalidField, LanguageTally, MissingAsset, ReconciliationReport, ReportBuilder,
};
