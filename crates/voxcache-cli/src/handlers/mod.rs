//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the orchestrator, reconciliation engine or batch runner
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain cache logic or touch the store's files.

pub mod config;
pub mod ensure;
pub mod generate;
pub mod lookup;
pub mod verify;
pub mod voices;
