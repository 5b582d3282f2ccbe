//! Main commands enum and shared argument groups.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use voxcache_core::{Language, SynthesisRequest, ValidationError, VoiceGender, VoiceParams};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find an existing asset without generating anything
    Lookup {
        #[command(flatten)]
        phrase: PhraseArgs,
    },

    /// Return the asset for a phrase, synthesizing it if missing
    Ensure {
        #[command(flatten)]
        phrase: PhraseArgs,
        /// Print the asset record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Audit a phrase corpus against the store (read-only)
    Verify {
        /// Corpus JSON file (category -> [{target, native}])
        corpus: PathBuf,
        /// Write the full report as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Only count assets of this gender (default: any)
        #[arg(long)]
        gender: Option<VoiceGender>,
        /// List every missing phrase
        #[arg(long)]
        show_missing: bool,
    },

    /// Generate every missing asset of a corpus
    Generate {
        /// Corpus JSON file (category -> [{target, native}])
        corpus: PathBuf,
        /// Number of concurrent workers (default from settings)
        #[arg(short, long)]
        concurrency: Option<usize>,
        /// Voice gender (default from settings)
        #[arg(long)]
        gender: Option<VoiceGender>,
        /// Preferred voice name
        #[arg(long)]
        voice: Option<String>,
        /// Plan only: reconcile and report what would be generated
        #[arg(long)]
        dry_run: bool,
    },

    /// List the voices the provider may use
    Voices {
        /// Only this language
        #[arg(short, long)]
        language: Option<Language>,
        /// Only this gender
        #[arg(short, long)]
        gender: Option<VoiceGender>,
    },

    /// Show the effective settings
    Config,
}

/// A phrase and its voice, given as flags or as a JSON request body.
#[derive(Args, Debug, Clone)]
pub struct PhraseArgs {
    /// Phrase text
    #[arg(required_unless_present = "request")]
    pub text: Option<String>,

    /// Phrase language
    #[arg(short, long, default_value = "en")]
    pub language: Language,

    /// Voice gender (default from settings)
    #[arg(short, long)]
    pub gender: Option<VoiceGender>,

    /// Preferred voice name
    #[arg(long)]
    pub voice: Option<String>,

    /// JSON request body: {"text", "language", "gender", "voice_name"}
    #[arg(long, conflicts_with_all = ["text", "language", "gender", "voice"])]
    pub request: Option<String>,
}

impl PhraseArgs {
    /// Build a validated request from the arguments.
    pub fn to_request(&self) -> Result<SynthesisRequest, RequestArgsError> {
        if let Some(body) = &self.request {
            let value: serde_json::Value = serde_json::from_str(body)
                .map_err(|e| RequestArgsError::Json(e.to_string()))?;
            return Ok(SynthesisRequest::from_json(&value)?);
        }

        let voice = VoiceParams {
            gender: self.gender,
            voice_name: self
                .voice
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            rate: None,
        };
        Ok(SynthesisRequest::new(
            self.text.clone().unwrap_or_default(),
            self.language,
            voice,
        )?)
    }
}

/// Invalid phrase arguments.
#[derive(Debug, thiserror::Error)]
pub enum RequestArgsError {
    #[error("Request body is not valid JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: Option<&str>, request: Option<&str>) -> PhraseArgs {
        PhraseArgs {
            text: text.map(str::to_string),
            language: Language::En,
            gender: None,
            voice: Some("  ".to_string()),
            request: request.map(str::to_string),
        }
    }

    #[test]
    fn test_flags_become_request() {
        let request = phrase(Some("Hello"), None).to_request().unwrap();
        assert_eq!(request.text, "Hello");
        assert_eq!(request.language, Language::En);
        assert_eq!(request.voice.voice_name, None);
    }

    #[test]
    fn test_json_body_becomes_request() {
        let request = phrase(None, Some(r#"{"text": "Привет", "language": "ru", "gender": "male"}"#))
            .to_request()
            .unwrap();
        assert_eq!(request.language, Language::Ru);
        assert_eq!(request.voice.gender, Some(VoiceGender::Male));
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(matches!(
            phrase(Some("  (note) "), None).to_request(),
            Err(RequestArgsError::Validation(ValidationError::EmptyText))
        ));
        assert!(matches!(
            phrase(None, Some("{not json")).to_request(),
            Err(RequestArgsError::Json(_))
        ));
        assert!(matches!(
            phrase(None, Some(r#"{"text": 5}"#)).to_request(),
            Err(RequestArgsError::Validation(ValidationError::InvalidInput { .. }))
        ));
    }
}
