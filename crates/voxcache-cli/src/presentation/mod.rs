//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain transforms belong in core services or the batch crate

pub mod progress;
pub mod report;
pub mod tables;

// Re-export commonly used items
pub use progress::BatchProgressPrinter;
pub use report::{display_asset, display_batch_summary, display_report};
pub use tables::{format_optional, percent, print_separator, truncate_string};
