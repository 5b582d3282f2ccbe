//! Cache key: the structural identity of a synthesis request.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Language, VoiceAttributes, VoiceGender};

/// Identity of one audio asset.
///
/// Equality and hashing consider only the fields that feed path derivation
/// in the current layout: normalized text, language and gender. The voice
/// name and the legacy hints ride along but never split a key in two.
///
/// A key performs no hashing of its own; digests are computed by each
/// storage generation because historical generations hash different inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    normalized_text: String,
    language: Language,
    voice: VoiceAttributes,
    #[serde(default, skip_serializing_if = "LegacyHints::is_empty")]
    legacy: LegacyHints,
}

/// Inputs that only older storage generations need.
///
/// Pre-normalization generations hashed the phrase as typed and grouped files
/// by category; a key keeps those inputs so such assets stay reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyHints {
    /// Phrase text as supplied (trimmed only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Corpus category the phrase belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LegacyHints {
    fn is_empty(&self) -> bool {
        self.source_text.is_none() && self.category.is_none()
    }
}

impl CacheKey {
    /// Build a key from already-normalized text.
    ///
    /// Prefer [`crate::normalize::key_for`] when starting from raw input.
    #[must_use]
    pub fn new(normalized_text: impl Into<String>, language: Language, voice: VoiceAttributes) -> Self {
        Self {
            normalized_text: normalized_text.into(),
            language,
            voice,
            legacy: LegacyHints::default(),
        }
    }

    /// Record the phrase exactly as typed (trimmed), for raw-hash generations.
    #[must_use]
    pub fn with_source_text(mut self, raw: &str) -> Self {
        self.legacy.source_text = Some(raw.trim().to_string());
        self
    }

    /// Record the corpus category, for the per-category generation.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.legacy.category = Some(category.into());
        self
    }

    /// Replace the gender, keeping everything else.
    #[must_use]
    pub const fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.voice.gender = Some(gender);
        self
    }

    /// Canonical normalized text.
    #[must_use]
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Language of the phrase.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Voice attributes.
    #[must_use]
    pub const fn voice(&self) -> &VoiceAttributes {
        &self.voice
    }

    /// Gender, if the key names one.
    #[must_use]
    pub const fn gender(&self) -> Option<VoiceGender> {
        self.voice.gender
    }

    /// Legacy hints.
    #[must_use]
    pub const fn legacy(&self) -> &LegacyHints {
        &self.legacy
    }

    /// Text hashed by raw-text generations: the source text when known,
    /// otherwise the normalized text.
    #[must_use]
    pub fn source_text(&self) -> &str {
        self.legacy
            .source_text
            .as_deref()
            .unwrap_or(&self.normalized_text)
    }

    /// Stable string form, used to key the single-flight lock table.
    #[must_use]
    pub fn canonical(&self) -> String {
        let gender = self.voice.gender.map_or("*", VoiceGender::as_str);
        format!("{gender}/{}/{}", self.language, self.normalized_text)
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_text == other.normalized_text
            && self.language == other.language
            && self.voice.gender == other.voice.gender
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_text.hash(state);
        self.language.hash(state);
        self.voice.gender.hash(state);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
