//! Typed form of an incoming synthesis request.

use serde_json::Value;

use super::{Language, ValidationError, VoiceGender, VoiceParams};
use crate::normalize::normalize;

/// A validated `{text, language, gender, voice_name}` request.
///
/// Construction guarantees the text normalizes to something non-empty, so
/// the request can go straight to lookup or ensure.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// Phrase as supplied.
    pub text: String,
    /// Phrase language.
    pub language: Language,
    /// Voice parameters for the provider.
    pub voice: VoiceParams,
}

impl SynthesisRequest {
    /// Build a request from typed parts.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyText`] if `text` normalizes to nothing.
    pub fn new(
        text: impl Into<String>,
        language: Language,
        voice: VoiceParams,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        normalize(&text)?;
        Ok(Self {
            text,
            language,
            voice,
        })
    }

    /// Map the untyped wire shape onto a request.
    ///
    /// A missing `language` means English; missing `gender` and
    /// `voice_name` are left for the orchestrator and provider to default.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`], checked before I/O of any kind.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = body else {
            return Err(ValidationError::invalid_input("request", body));
        };

        let text = match fields.get("text") {
            None | Some(Value::Null) => return Err(ValidationError::EmptyText),
            Some(Value::String(text)) => text.clone(),
            Some(other) => return Err(ValidationError::invalid_input("text", other)),
        };

        let language = match fields.get("language") {
            None | Some(Value::Null) => Language::En,
            Some(value) => Language::from_json(value)?,
        };

        let gender = match fields.get("gender") {
            None | Some(Value::Null) => None,
            Some(Value::String(g)) => Some(g.parse::<VoiceGender>()?),
            Some(other) => return Err(ValidationError::invalid_input("gender", other)),
        };

        let voice_name = match fields.get("voice_name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) if name.trim().is_empty() => None,
            Some(Value::String(name)) => Some(name.trim().to_string()),
            Some(other) => return Err(ValidationError::invalid_input("voice_name", other)),
        };

        Self::new(
            text,
            language,
            VoiceParams {
                gender,
                voice_name,
                rate: None,
            },
        )
    }
}
