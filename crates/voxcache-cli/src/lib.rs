//! Command-line front end for voxcache.
//!
//! The `voxcache` binary wires the asset store, the HTTP speech provider and
//! the generation orchestrator together (see [`bootstrap`]) and exposes
//! `lookup`, `ensure`, `verify`, `generate`, `voices` and `config`.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, PhraseArgs};
pub use error::{CliError, exit_code_for};
pub use parser::Cli;
