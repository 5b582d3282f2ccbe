//! Generate-or-fetch orchestration.
//!
//! `ensure` is the single write path into the store. The fast path is a
//! plain lookup with no lock. On a miss the caller takes the per-key lock,
//! looks again, and only then calls the provider, so at most one synthesis
//! per key is in flight.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::key_lock::KeyLockTable;
use crate::domain::{
    AssetRecord, CacheKey, Language, SynthesisRequest, ValidationError, VoiceGender, VoiceParams,
};
use crate::normalize::key_for;
use crate::ports::{ProviderError, SpeechProvider};
use crate::settings::{DEFAULT_REQUEST_DELAY_MS, Settings};
use crate::store::{AssetStore, StoreError};

/// Errors from [`GenerationOrchestrator::ensure`].
#[derive(Debug, Error)]
pub enum EnsureError {
    /// Rejected before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider failed or returned no audio. Nothing was written.
    #[error("Generation failed for '{key}' ({language}): {source}")]
    Generation {
        /// Canonical key string
        key: String,
        /// Phrase language
        language: Language,
        /// Provider failure
        source: ProviderError,
    },

    /// Audio was produced but could not be stored.
    #[error("Failed to store audio for '{key}' ({language}): {source}")]
    Write {
        /// Canonical key string
        key: String,
        /// Phrase language
        language: Language,
        /// Store failure
        source: StoreError,
    },
}

impl EnsureError {
    fn generation(key: &CacheKey, source: ProviderError) -> Self {
        Self::Generation {
            key: key.canonical(),
            language: key.language(),
            source,
        }
    }

    fn write(key: &CacheKey, source: StoreError) -> Self {
        Self::Write {
            key: key.canonical(),
            language: key.language(),
            source,
        }
    }

    /// Whether the input was rejected.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status a request surface should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Generation { .. } | Self::Write { .. } => 500,
        }
    }
}

/// Result of a successful `ensure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The asset was already in the store.
    Existing(AssetRecord),
    /// The asset was synthesized and committed by this call.
    Created(AssetRecord),
}

impl EnsureOutcome {
    /// The asset record.
    #[must_use]
    pub const fn record(&self) -> &AssetRecord {
        match self {
            Self::Existing(r) | Self::Created(r) => r,
        }
    }

    /// Take the asset record.
    #[must_use]
    pub fn into_record(self) -> AssetRecord {
        match self {
            Self::Existing(r) | Self::Created(r) => r,
        }
    }

    /// Whether this call created the asset.
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// 200 when the asset existed, 201 when it was created.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Existing(_) => 200,
            Self::Created(_) => 201,
        }
    }
}

/// Composes normalizer, store and provider into an idempotent `ensure`.
pub struct GenerationOrchestrator {
    store: Arc<AssetStore>,
    provider: Arc<dyn SpeechProvider>,
    locks: KeyLockTable,
    request_delay: Duration,
    default_gender: VoiceGender,
}

impl GenerationOrchestrator {
    /// Create an orchestrator with the default delay and gender.
    pub fn new(store: Arc<AssetStore>, provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            store,
            provider,
            locks: KeyLockTable::new(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            default_gender: VoiceGender::default(),
        }
    }

    /// Create an orchestrator configured from settings.
    pub fn from_settings(
        store: Arc<AssetStore>,
        provider: Arc<dyn SpeechProvider>,
        settings: &Settings,
    ) -> Self {
        Self::new(store, provider)
            .with_request_delay(settings.effective_request_delay())
            .with_default_gender(settings.effective_default_gender())
    }

    /// Set the pause applied after each successful provider call.
    #[must_use]
    pub const fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the gender used when a request names none.
    #[must_use]
    pub const fn with_default_gender(mut self, gender: VoiceGender) -> Self {
        self.default_gender = gender;
        self
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<AssetStore> {
        &self.store
    }

    /// The provider in use.
    #[must_use]
    pub const fn provider(&self) -> &Arc<dyn SpeechProvider> {
        &self.provider
    }

    /// Look up a request without generating.
    ///
    /// A request without gender matches any gender.
    ///
    /// # Errors
    ///
    /// Validation errors only.
    pub fn lookup(&self, request: &SynthesisRequest) -> Result<Option<AssetRecord>, ValidationError> {
        let key = key_for(&request.text, request.language, request.voice.attributes())?;
        Ok(self.store.lookup(&key))
    }

    /// Ensure an asset exists for a request.
    ///
    /// # Errors
    ///
    /// See [`EnsureError`].
    pub async fn ensure(&self, request: &SynthesisRequest) -> Result<EnsureOutcome, EnsureError> {
        self.ensure_text(&request.text, request.language, &request.voice)
            .await
    }

    /// Ensure an asset exists for raw text.
    ///
    /// # Errors
    ///
    /// See [`EnsureError`].
    pub async fn ensure_text(
        &self,
        text: &str,
        language: Language,
        voice: &VoiceParams,
    ) -> Result<EnsureOutcome, EnsureError> {
        let voice = self.resolve_voice(voice);
        let key = key_for(text, language, voice.attributes())?;
        self.ensure_key(&key, &voice).await
    }

    /// Ensure an asset exists for an already-derived key.
    ///
    /// A key without gender takes the voice's gender (or the default), so
    /// the asset always lands in the current generation. A key with a gender
    /// overrides the voice's.
    ///
    /// # Errors
    ///
    /// [`EnsureError::Generation`] or [`EnsureError::Write`].
    pub async fn ensure_key(
        &self,
        key: &CacheKey,
        voice: &VoiceParams,
    ) -> Result<EnsureOutcome, EnsureError> {
        let mut voice = self.resolve_voice(voice);
        let key = match key.gender() {
            Some(gender) => {
                voice.gender = Some(gender);
                key.clone()
            }
            None => key.clone().with_gender(voice.gender.unwrap_or(self.default_gender)),
        };

        if let Some(record) = self.store.lookup(&key) {
            tracing::debug!(target: "voxcache.orchestrator", key = %key, "Cache hit");
            return Ok(EnsureOutcome::Existing(record));
        }

        let guard = self.locks.acquire(&key.canonical()).await;

        if let Some(record) = self.store.lookup(&key) {
            tracing::debug!(
                target: "voxcache.orchestrator",
                key = %key,
                "Generated by a concurrent caller"
            );
            return Ok(EnsureOutcome::Existing(record));
        }

        tracing::info!(
            target: "voxcache.orchestrator",
            key = %key,
            language = %key.language(),
            gender = ?key.gender(),
            voice = ?voice.voice_name,
            "Synthesizing"
        );

        let audio = self
            .provider
            .synthesize(key.normalized_text(), key.language(), &voice)
            .await
            .map_err(|source| EnsureError::generation(&key, source))?;

        let result = if audio.is_empty() {
            Err(EnsureError::generation(&key, ProviderError::EmptyAudio))
        } else {
            self.store
                .commit(&key, &audio)
                .map_err(|source| EnsureError::write(&key, source))
        };
        drop(guard);

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        result.map(EnsureOutcome::Created)
    }

    fn resolve_voice(&self, voice: &VoiceParams) -> VoiceParams {
        let mut voice = voice.clone();
        if voice.gender.is_none() {
            voice.gender = Some(self.default_gender);
        }
        voice
    }
}

impl std::fmt::Debug for GenerationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("store", &self.store)
            .field("request_delay", &self.request_delay)
            .field("default_gender", &self.default_gender)
            .finish_non_exhaustive()
    }
}
