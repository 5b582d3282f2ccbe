//! Voice catalog: the explicit table of voices the provider may use.
//!
//! The catalog is built once and handed to the provider at construction.
//! There is no process-wide registry.

use std::collections::BTreeMap;

use serde::Serialize;
use voxcache_core::{Language, VoiceGender};

const EN_MALE: &[&str] = &[
    "en-US-ChristopherNeural",
    "en-US-EricNeural",
    "en-US-BrandonNeural",
    "en-US-GuyNeural",
    "en-GB-RyanNeural",
    "en-GB-AlfieNeural",
    "en-AU-WilliamNeural",
    "en-CA-LiamNeural",
];

const EN_FEMALE: &[&str] = &[
    "en-US-AriaNeural",
    "en-US-JennyNeural",
    "en-US-EmmaNeural",
    "en-US-NancyNeural",
    "en-US-AmberNeural",
    "en-US-AnaNeural",
    "en-GB-SoniaNeural",
    "en-GB-LibbyNeural",
    "en-GB-MollyNeural",
    "en-AU-NatashaNeural",
    "en-AU-AnnetteNeural",
    "en-CA-ClaraNeural",
];

const RU_MALE: &[&str] = &["ru-RU-DmitryNeural", "ru-RU-SergeyNeural"];

const RU_FEMALE: &[&str] = &["ru-RU-SvetlanaNeural", "ru-RU-DariyaNeural"];

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceEntry {
    pub language: Language,
    pub gender: VoiceGender,
    pub name: String,
}

/// Voices per language and gender, plus a speaking rate per language.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: BTreeMap<(Language, VoiceGender), Vec<String>>,
    rates: BTreeMap<Language, f32>,
}

impl VoiceCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in voice table (English and Russian neural voices).
    ///
    /// Russian is spoken slightly slower (0.9) than English (1.0).
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_voices(Language::En, VoiceGender::Male, EN_MALE)
            .with_voices(Language::En, VoiceGender::Female, EN_FEMALE)
            .with_voices(Language::Ru, VoiceGender::Male, RU_MALE)
            .with_voices(Language::Ru, VoiceGender::Female, RU_FEMALE)
            .with_rate(Language::En, 1.0)
            .with_rate(Language::Ru, 0.9)
    }

    /// Append voices for a language and gender.
    #[must_use]
    pub fn with_voices<S: AsRef<str>>(
        mut self,
        language: Language,
        gender: VoiceGender,
        names: &[S],
    ) -> Self {
        self.voices
            .entry((language, gender))
            .or_default()
            .extend(names.iter().map(|n| n.as_ref().to_string()));
        self
    }

    /// Set the speaking rate for a language.
    #[must_use]
    pub fn with_rate(mut self, language: Language, rate: f32) -> Self {
        self.rates.insert(language, rate);
        self
    }

    /// Voices for a language and gender, in preference order.
    #[must_use]
    pub fn voices(&self, language: Language, gender: VoiceGender) -> &[String] {
        self.voices
            .get(&(language, gender))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every voice, ordered by language then gender.
    pub fn entries(&self) -> impl Iterator<Item = VoiceEntry> + '_ {
        self.voices.iter().flat_map(|((language, gender), names)| {
            names.iter().map(move |name| VoiceEntry {
                language: *language,
                gender: *gender,
                name: name.clone(),
            })
        })
    }

    /// Speaking rate for a language (1.0 when unset).
    #[must_use]
    pub fn rate(&self, language: Language) -> f32 {
        self.rates.get(&language).copied().unwrap_or(1.0)
    }

    /// Pick a concrete voice.
    ///
    /// The requested name wins when it is listed for the language and
    /// gender. Otherwise the first voice for the language and gender is
    /// used, then the first English voice of that gender, then any voice.
    #[must_use]
    pub fn resolve(
        &self,
        language: Language,
        gender: VoiceGender,
        requested: Option<&str>,
    ) -> Option<&str> {
        let candidates = self.voices(language, gender);

        if let Some(name) = requested {
            if let Some(found) = candidates.iter().find(|v| v.as_str() == name) {
                return Some(found.as_str());
            }
            tracing::warn!(
                target: "voxcache.provider",
                requested = name,
                language = %language,
                gender = %gender,
                "Requested voice is not available, falling back"
            );
        }

        candidates
            .first()
            .or_else(|| self.voices(Language::En, gender).first())
            .or_else(|| self.voices.values().flatten().next())
            .map(String::as_str)
    }
}
