//! Phrase corpus: ordered categories of target/native phrase pairs.
//!
//! The corpus is read-only input. Category order and phrase order within a
//! category are preserved so that reports are deterministic and diffable.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Language;

/// Errors loading a corpus. Fatal to any batch that needs the corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("Failed to read corpus '{path}': {message}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The corpus document is not the expected JSON shape.
    #[error("Invalid corpus JSON: {message}")]
    Parse {
        /// Parser error message.
        message: String,
    },
}

/// Which half of a phrase pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseSide {
    /// Studied-language phrase (English).
    Target,
    /// Learner's native-language phrase (Russian).
    Native,
}

impl PhraseSide {
    /// Language the side is spoken in.
    #[must_use]
    pub const fn language(self) -> Language {
        match self {
            Self::Target => Language::En,
            Self::Native => Language::Ru,
        }
    }
}

/// Wire shape of one phrase pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PhrasePair {
    #[serde(default)]
    target: String,
    #[serde(default)]
    native: String,
}

/// One phrase pair with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusEntry {
    /// Category the pair belongs to.
    pub category: String,
    /// English phrase (may be empty).
    pub target_text: String,
    /// Russian phrase (may be empty).
    pub native_text: String,
}

impl CorpusEntry {
    /// Build an entry.
    pub fn new(
        category: impl Into<String>,
        target_text: impl Into<String>,
        native_text: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            target_text: target_text.into(),
            native_text: native_text.into(),
        }
    }

    /// Both sides in report order: target first, then native.
    #[must_use]
    pub fn sides(&self) -> [(PhraseSide, &str); 2] {
        [
            (PhraseSide::Target, self.target_text.as_str()),
            (PhraseSide::Native, self.native_text.as_str()),
        ]
    }
}

/// An ordered phrase corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Build a corpus from entries already in corpus order.
    #[must_use]
    pub const fn from_entries(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Parse the `{ category: [{target, native}, ...] }` JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let categories: IndexMap<String, Vec<PhrasePair>> =
            serde_json::from_str(json).map_err(|e| CorpusError::Parse {
                message: e.to_string(),
            })?;

        let entries = categories
            .into_iter()
            .flat_map(|(category, pairs)| {
                pairs.into_iter().map(move |pair| CorpusEntry {
                    category: category.clone(),
                    target_text: pair.target,
                    native_text: pair.native,
                })
            })
            .collect();

        Ok(Self { entries })
    }

    /// Read and parse a corpus file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let json = std::fs::read_to_string(path).map_err(|e| CorpusError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let corpus = Self::from_json_str(&json)?;
        tracing::info!(
            target: "voxcache.corpus",
            path = %path.display(),
            categories = corpus.category_count(),
            entries = corpus.len(),
            "Loaded corpus"
        );
        Ok(corpus)
    }

    /// Entries in corpus order.
    #[must_use]
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Number of phrase pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.category.as_str())
            .collect::<IndexSet<_>>()
            .len()
    }
}
