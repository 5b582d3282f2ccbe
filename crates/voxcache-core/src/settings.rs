//! Settings domain types and validation.
//!
//! Settings come from the environment (optionally seeded from a `.env`
//! file by the binary) and can be overridden per invocation.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::VoiceGender;

/// Delay applied after each successful provider call.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 300;

/// Default number of batch workers.
pub const DEFAULT_MAX_CONCURRENCY: u32 = 3;

/// Upper bound on batch workers.
pub const MAX_CONCURRENCY_LIMIT: u32 = 32;

/// Environment variable naming the audio root.
pub const AUDIO_DIR_ENV: &str = "VOXCACHE_AUDIO_DIR";

/// Older name for [`AUDIO_DIR_ENV`], still honoured.
pub const LEGACY_AUDIO_DIR_ENV: &str = "BASE_AUDIO_DIR";

const REQUEST_DELAY_ENV: &str = "VOXCACHE_REQUEST_DELAY_MS";
const CONCURRENCY_ENV: &str = "VOXCACHE_CONCURRENCY";
const DEFAULT_GENDER_ENV: &str = "VOXCACHE_DEFAULT_GENDER";

/// Application settings structure.
///
/// All fields are optional to support partial configuration and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root directory of the audio store.
    pub audio_root: Option<String>,

    /// Pause after each successful provider call, in milliseconds.
    pub request_delay_ms: Option<u64>,

    /// Batch worker count (1-32).
    pub max_concurrency: Option<u32>,

    /// Gender used when a request does not name one.
    pub default_gender: Option<VoiceGender>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            audio_root: None,
            request_delay_ms: Some(DEFAULT_REQUEST_DELAY_MS),
            max_concurrency: Some(DEFAULT_MAX_CONCURRENCY),
            default_gender: Some(VoiceGender::Female),
        }
    }

    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_lookup`].
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, starting from the defaults.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] for unparseable or out-of-range values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut settings = Self::with_defaults();

        if let Some(root) = get(AUDIO_DIR_ENV).or_else(|| get(LEGACY_AUDIO_DIR_ENV)) {
            settings.audio_root = Some(root);
        }
        if let Some(raw) = get(REQUEST_DELAY_ENV) {
            settings.request_delay_ms = Some(parse_number(REQUEST_DELAY_ENV, &raw)?);
        }
        if let Some(raw) = get(CONCURRENCY_ENV) {
            settings.max_concurrency = Some(parse_number(CONCURRENCY_ENV, &raw)?);
        }
        if let Some(raw) = get(DEFAULT_GENDER_ENV) {
            let gender = raw
                .parse::<VoiceGender>()
                .map_err(|_| SettingsError::InvalidGender(raw.clone()))?;
            settings.default_gender = Some(gender);
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Get the effective audio root (with default fallback).
    ///
    /// # Errors
    ///
    /// [`SettingsError::NoDataDir`] when no root is configured and the
    /// platform has no data directory.
    pub fn effective_audio_root(&self) -> Result<PathBuf, SettingsError> {
        if let Some(root) = &self.audio_root {
            return Ok(PathBuf::from(root));
        }
        dirs::data_dir()
            .map(|d| d.join("voxcache").join("voices"))
            .ok_or(SettingsError::NoDataDir)
    }

    /// Get the effective request delay (with default fallback).
    #[must_use]
    pub fn effective_request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms.unwrap_or(DEFAULT_REQUEST_DELAY_MS))
    }

    /// Get the effective worker count (with default fallback).
    #[must_use]
    pub fn effective_max_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY) as usize
    }

    /// Get the effective default gender.
    #[must_use]
    pub fn effective_default_gender(&self) -> VoiceGender {
        self.default_gender.unwrap_or_default()
    }

    /// Merge an update into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref root) = other.audio_root {
            self.audio_root.clone_from(root);
        }
        if let Some(delay) = other.request_delay_ms {
            self.request_delay_ms = delay;
        }
        if let Some(concurrency) = other.max_concurrency {
            self.max_concurrency = concurrency;
        }
        if let Some(gender) = other.default_gender {
            self.default_gender = gender;
        }
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, SettingsError> {
    raw.trim().parse().map_err(|_| SettingsError::InvalidNumber {
        var: var.to_string(),
        value: raw.to_string(),
    })
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub audio_root: Option<Option<String>>,
    pub request_delay_ms: Option<Option<u64>>,
    pub max_concurrency: Option<Option<u32>>,
    pub default_gender: Option<Option<VoiceGender>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Max concurrency must be between 1 and {MAX_CONCURRENCY_LIMIT}, got {0}")]
    InvalidConcurrency(u32),

    #[error("Audio root cannot be empty")]
    EmptyAudioRoot,

    #[error("Default gender must be 'male' or 'female', got '{0}'")]
    InvalidGender(String),

    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: String, value: String },

    #[error("No platform data directory; set {AUDIO_DIR_ENV}")]
    NoDataDir,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(concurrency) = settings.max_concurrency
        && !(1..=MAX_CONCURRENCY_LIMIT).contains(&concurrency)
    {
        return Err(SettingsError::InvalidConcurrency(concurrency));
    }

    if settings
        .audio_root
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyAudioRoot);
    }

    Ok(())
}
