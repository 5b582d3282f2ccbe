//! Corpus-versus-store reconciliation.

use std::sync::Arc;

use super::report::{InvalidField, MissingAsset, ReconciliationReport, ReportBuilder};
use crate::domain::{Corpus, VoiceAttributes, VoiceGender};
use crate::normalize::key_for;
use crate::store::AssetStore;

/// Read-only audit of which corpus phrases have audio.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    store: Arc<AssetStore>,
    gender: Option<VoiceGender>,
}

impl ReconciliationEngine {
    /// Engine that accepts an asset of any gender.
    pub const fn new(store: Arc<AssetStore>) -> Self {
        Self {
            store,
            gender: None,
        }
    }

    /// Only count assets recorded for `gender` (in the current layout).
    #[must_use]
    pub const fn with_gender(mut self, gender: Option<VoiceGender>) -> Self {
        self.gender = gender;
        self
    }

    /// Check every non-empty phrase of the corpus against the store.
    ///
    /// Target and native sides are checked independently, target first, in
    /// corpus order. Blank sides are skipped. Text that is not blank but
    /// normalizes to nothing is listed under `invalid`.
    pub fn verify(&self, corpus: &Corpus) -> ReconciliationReport {
        let voice = VoiceAttributes {
            gender: self.gender,
            voice_name: None,
        };
        let mut report = ReportBuilder::new();

        for entry in corpus.entries() {
            for (side, text) in entry.sides() {
                if text.trim().is_empty() {
                    continue;
                }
                let language = side.language();

                let key = match key_for(text, language, voice.clone()) {
                    Ok(key) => key.with_category(entry.category.clone()),
                    Err(err) => {
                        report.invalid(InvalidField {
                            category: entry.category.clone(),
                            language,
                            phrase: text.to_string(),
                            reason: err.to_string(),
                        });
                        continue;
                    }
                };

                match self.store.lookup(&key) {
                    Some(record) => {
                        report.found(&entry.category, language, record.schema_generation);
                    }
                    None => {
                        let expected_path = self.store.canonical_path(&key).unwrap_or_default();
                        tracing::debug!(
                            target: "voxcache.reconcile",
                            category = %entry.category,
                            language = %language,
                            phrase = text,
                            "Missing asset"
                        );
                        report.missing(MissingAsset {
                            category: entry.category.clone(),
                            language,
                            phrase: text.to_string(),
                            expected_path,
                            key,
                        });
                    }
                }
            }
        }

        let report = report.finish();
        tracing::info!(
            target: "voxcache.reconcile",
            expected = report.total_expected,
            found = report.total_found,
            missing = report.total_missing(),
            invalid = report.invalid.len(),
            legacy = report.legacy_found(),
            "Reconciliation complete"
        );
        report
    }
}
