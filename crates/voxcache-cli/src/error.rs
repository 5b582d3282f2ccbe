//! CLI-specific error types and mappings.
//!
//! This module provides the error type for the CLI adapter and mappings
//! from the library errors to exit codes and user-facing messages.

use thiserror::Error;
use voxcache_batch::BatchError;
use voxcache_core::{CorpusError, EnsureError, ProviderError, SettingsError};

use crate::commands::RequestArgsError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Operation failed.
    #[error("{0}")]
    Core(String),

    /// Argument or request validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Input file could not be parsed.
    #[error("Invalid input data: {0}")]
    Data(String),

    /// Speech service unreachable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Data(_) => 65,        // EX_DATAERR
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<EnsureError> for CliError {
    fn from(err: EnsureError) -> Self {
        match &err {
            EnsureError::Validation(_) => Self::Arguments(err.to_string()),
            EnsureError::Generation { source, .. } if source.is_unavailable() => {
                Self::Unavailable(err.to_string())
            }
            EnsureError::Generation { .. } => Self::Core(err.to_string()),
            EnsureError::Write { .. } => Self::Io(err.to_string()),
        }
    }
}

impl From<BatchError> for CliError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::ProviderUnavailable(e) => Self::Unavailable(e.to_string()),
            BatchError::Corpus(e) => e.into(),
        }
    }
}

impl From<CorpusError> for CliError {
    fn from(err: CorpusError) -> Self {
        match err {
            CorpusError::Read { .. } => Self::Io(err.to_string()),
            CorpusError::Parse { .. } => Self::Data(err.to_string()),
        }
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        if err.is_unavailable() {
            Self::Unavailable(err.to_string())
        } else {
            Self::Core(err.to_string())
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<RequestArgsError> for CliError {
    fn from(err: RequestArgsError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
