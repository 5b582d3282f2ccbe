//! Asset records returned by lookups and commits.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::CacheKey;

/// Storage generation an asset was found under.
///
/// Ordered oldest to newest; the derived `Ord` follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaGeneration {
    /// `root/{lang}_{md5(raw)}.mp3`
    FlatRoot,
    /// `root/{category}/{lang}_{md5(raw)}.mp3`
    PerCategory,
    /// `root/{lang}/{lang}_{md5(normalized)}.mp3`
    PerLanguage,
    /// `root/{gender}/{lang}/{lang}_{md5(normalized)}.mp3`
    PerGenderLanguage,
}

impl SchemaGeneration {
    /// Numeric generation index (G0..G3).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::FlatRoot => 0,
            Self::PerCategory => 1,
            Self::PerLanguage => 2,
            Self::PerGenderLanguage => 3,
        }
    }

    /// Whether this is the generation used for writes.
    #[must_use]
    pub const fn is_current(self) -> bool {
        matches!(self, Self::PerGenderLanguage)
    }
}

impl fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.index())
    }
}

/// An audio asset present in the store.
///
/// Never mutated: every lookup or commit produces a fresh record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Key the asset answers to.
    pub key: CacheKey,
    /// Location on disk.
    pub path: PathBuf,
    /// File size in bytes (always non-zero).
    pub size_bytes: u64,
    /// `true` when the asset was already on disk before this operation.
    pub already_existed: bool,
    /// Layout generation the asset lives under.
    pub schema_generation: SchemaGeneration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_order_oldest_first() {
        assert!(SchemaGeneration::FlatRoot < SchemaGeneration::PerCategory);
        assert!(SchemaGeneration::PerLanguage < SchemaGeneration::PerGenderLanguage);
        assert_eq!(SchemaGeneration::PerCategory.to_string(), "G1");
        assert!(SchemaGeneration::PerGenderLanguage.is_current());
    }
}
