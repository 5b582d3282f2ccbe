//! Supported corpus languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

/// A language the cache can hold audio for.
///
/// The corpus is bilingual: English is the studied (target) language and
/// Russian is the learner's native language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (`en`).
    En,
    /// Russian (`ru`).
    Ru,
}

impl Language {
    /// All supported languages, in report order.
    pub const ALL: [Self; 2] = [Self::En, Self::Ru];

    /// The two-letter code used in file names and directory names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// Parse a language from an untyped JSON value.
    ///
    /// Non-string values are rejected with [`ValidationError::InvalidInput`],
    /// unknown codes with [`ValidationError::UnsupportedLanguage`].
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        match value {
            serde_json::Value::String(code) => code.parse(),
            other => Err(ValidationError::invalid_input("language", other)),
        }
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(ValidationError::UnsupportedLanguage {
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
