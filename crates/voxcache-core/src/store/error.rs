//! Store error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures while committing an asset. Reads never fail; a miss is `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Refused to write zero bytes.
    #[error("Refusing to commit empty audio to {}", path.display())]
    EmptyPayload {
        /// Target that was not written.
        path: PathBuf,
    },

    /// Local filesystem failure (permissions, disk full, ...).
    #[error("Failed to write {}: {message}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },
}

impl StoreError {
    /// Create a write error from an I/O error.
    pub fn write(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// The path the failed commit targeted.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::EmptyPayload { path } | Self::Write { path, .. } => path,
        }
    }
}
