//! Voice attributes carried with a synthesis request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

/// Voice gender. Determines the top-level directory of the current layout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    /// Female voice (the historical default).
    #[default]
    Female,
    /// Male voice.
    Male,
}

impl VoiceGender {
    /// Lookup order used when a request does not name a gender.
    pub const SEARCH_ORDER: [Self; 2] = [Self::Female, Self::Male];

    /// Directory name for this gender.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl FromStr for VoiceGender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(ValidationError::InvalidGender {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice attributes that are part of a cache key.
///
/// Only `gender` participates in path derivation. `voice_name` travels with
/// the key so the provider can honour it, but two keys that differ only in
/// voice name address the same asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAttributes {
    /// Requested gender, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<VoiceGender>,
    /// Requested provider voice, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
}

impl VoiceAttributes {
    /// Attributes for a gender with no specific voice.
    #[must_use]
    pub const fn with_gender(gender: VoiceGender) -> Self {
        Self {
            gender: Some(gender),
            voice_name: None,
        }
    }
}

/// Parameters passed through to the speech provider.
///
/// The cache does not interpret these beyond reading `gender` for the key;
/// voice selection is the provider adapter's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceParams {
    /// Requested gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<VoiceGender>,
    /// Requested provider voice name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    /// Speaking-rate multiplier; `None` lets the provider pick its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
}

impl VoiceParams {
    /// Parameters requesting a gender only.
    #[must_use]
    pub const fn gender(gender: VoiceGender) -> Self {
        Self {
            gender: Some(gender),
            voice_name: None,
            rate: None,
        }
    }

    /// Set a specific voice name.
    #[must_use]
    pub fn with_voice_name(mut self, name: impl Into<String>) -> Self {
        self.voice_name = Some(name.into());
        self
    }

    /// The subset of parameters that belongs in a cache key.
    #[must_use]
    pub fn attributes(&self) -> VoiceAttributes {
        VoiceAttributes {
            gender: self.gender,
            voice_name: self.voice_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_round_trips_through_str() {
        assert_eq!("Male".parse::<VoiceGender>().unwrap(), VoiceGender::Male);
        assert_eq!(VoiceGender::Female.to_string(), "female");
    }

    #[test]
    fn unknown_gender_is_rejected() {
        assert!(matches!(
            "robot".parse::<VoiceGender>(),
            Err(ValidationError::InvalidGender { .. })
        ));
    }

    #[test]
    fn params_project_to_attributes() {
        let params = VoiceParams::gender(VoiceGender::Male).with_voice_name("ru-RU-DmitryNeural");
        let attrs = params.attributes();
        assert_eq!(attrs.gender, Some(VoiceGender::Male));
        assert_eq!(attrs.voice_name.as_deref(), Some("ru-RU-DmitryNeural"));
    }
}
