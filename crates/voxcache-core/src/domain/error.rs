//! Input validation errors.
//!
//! Validation happens before any filesystem or provider I/O. These errors are
//! never retried and map to a client error at the request surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected input: bad text, language or gender.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty, whitespace-only, or consists only of annotations.
    #[error("Text is empty after normalization")]
    EmptyText,

    /// A field that must be text held some other JSON type.
    #[error("Invalid input for '{field}': expected a string, got {found}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// JSON type that was supplied instead.
        found: String,
    },

    /// Language code outside the supported set.
    #[error("Unsupported language '{code}' (supported: en, ru)")]
    UnsupportedLanguage {
        /// The code as supplied.
        code: String,
    },

    /// Gender other than `male` or `female`.
    #[error("Invalid gender '{value}' (expected: male, female)")]
    InvalidGender {
        /// The value as supplied.
        value: String,
    },
}

impl ValidationError {
    /// Create an invalid-input error describing the JSON type received.
    pub fn invalid_input(field: impl Into<String>, value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::InvalidInput {
            field: field.into(),
            found: found.to_string(),
        }
    }
}
