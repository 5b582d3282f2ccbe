//! Reconciliation report and its append-only builder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{CacheKey, Language, SchemaGeneration};

/// Found/missing counts for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTally {
    pub found: usize,
    pub missing: usize,
}

impl LanguageTally {
    /// Fraction of expected assets present, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_percent(&self) -> f64 {
        let expected = self.found + self.missing;
        if expected == 0 {
            100.0
        } else {
            self.found as f64 * 100.0 / expected as f64
        }
    }
}

/// Counts for one corpus category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub expected: usize,
    pub found: usize,
    pub missing: usize,
}

/// An expected asset that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingAsset {
    pub category: String,
    pub language: Language,
    /// Phrase as it appears in the corpus.
    pub phrase: String,
    /// Where generation would write it.
    pub expected_path: PathBuf,
    pub key: CacheKey,
}

/// A corpus field whose text normalizes to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidField {
    pub category: String,
    pub language: Language,
    pub phrase: String,
    pub reason: String,
}

/// Completeness of the store against a corpus.
///
/// `total_found + missing.len() == total_expected` always holds; fields
/// listed in `invalid` are not part of either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub generated_at: DateTime<Utc>,
    pub total_expected: usize,
    pub total_found: usize,
    pub per_language: BTreeMap<Language, LanguageTally>,
    pub per_category: IndexMap<String, CategoryTally>,
    /// How many found assets live under each layout generation.
    pub per_generation: BTreeMap<SchemaGeneration, usize>,
    /// Misses in corpus order.
    pub missing: Vec<MissingAsset>,
    pub invalid: Vec<InvalidField>,
}

impl ReconciliationReport {
    /// Every expected asset is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Number of misses.
    #[must_use]
    pub fn total_missing(&self) -> usize {
        self.missing.len()
    }

    /// Coverage percentage for one language (100 when nothing is expected).
    #[must_use]
    pub fn coverage_percent(&self, language: Language) -> f64 {
        self.per_language
            .get(&language)
            .map_or(100.0, LanguageTally::coverage_percent)
    }

    /// Found assets that still live in an older layout.
    #[must_use]
    pub fn legacy_found(&self) -> usize {
        self.per_generation
            .iter()
            .filter(|(g, _)| !g.is_current())
            .map(|(_, n)| n)
            .sum()
    }

    /// Write the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// I/O or serialization failure.
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

/// Append-only report construction.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    total_found: usize,
    per_language: BTreeMap<Language, LanguageTally>,
    per_category: IndexMap<String, CategoryTally>,
    per_generation: BTreeMap<SchemaGeneration, usize>,
    missing: Vec<MissingAsset>,
    invalid: Vec<InvalidField>,
}

impl ReportBuilder {
    /// Start an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn category(&mut self, category: &str) -> &mut CategoryTally {
        self.per_category.entry(category.to_string()).or_default()
    }

    /// Count an asset that was found.
    pub fn found(&mut self, category: &str, language: Language, generation: SchemaGeneration) {
        self.total_found += 1;
        self.per_language.entry(language).or_default().found += 1;
        *self.per_generation.entry(generation).or_default() += 1;
        let tally = self.category(category);
        tally.expected += 1;
        tally.found += 1;
    }

    /// Record an asset that was not found.
    pub fn missing(&mut self, asset: MissingAsset) {
        self.per_language.entry(asset.language).or_default().missing += 1;
        let tally = self.category(&asset.category);
        tally.expected += 1;
        tally.missing += 1;
        self.missing.push(asset);
    }

    /// Record a field that could not be keyed.
    pub fn invalid(&mut self, field: InvalidField) {
        self.category(&field.category);
        self.invalid.push(field);
    }

    /// Freeze the report.
    #[must_use]
    pub fn finish(self) -> ReconciliationReport {
        ReconciliationReport {
            generated_at: Utc::now(),
            total_expected: self.total_found + self.missing.len(),
            total_found: self.total_found,
            per_language: self.per_language,
            per_category: self.per_category,
            per_generation: self.per_generation,
            missing: self.missing,
            invalid: self.invalid,
        }
    }
}
