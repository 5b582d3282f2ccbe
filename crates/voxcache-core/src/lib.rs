//! Content-addressed cache for synthesized speech.
//!
//! Phrase text is normalized into a [`CacheKey`]; the [`AssetStore`] maps
//! keys onto files through an ordered [`StorageLayout`] so that audio
//! written under any historical directory scheme stays readable. The
//! [`GenerationOrchestrator`] fills misses through a [`SpeechProvider`]
//! with at most one synthesis per key in flight, and the
//! [`ReconciliationEngine`] audits a phrase corpus against the store.

pub mod domain;
pub mod normalize;
pub mod ports;
pub mod services;
pub mod settings;
pub mod store;

pub use domain::{
    AssetRecord, CacheKey, Corpus, CorpusEntry, CorpusError, Language, LegacyHints, PhraseSide,
    SchemaGeneration, SynthesisRequest, ValidationError, VoiceAttributes, VoiceGender,
    VoiceParams,
};
pub use normalize::{derive_key, key_for, normalize, normalize_value};
pub use ports::{ProviderError, SpeechProvider};
pub use services::{
    CategoryTally, EnsureError, EnsureOutcome, GenerationOrchestrator, InvalidField,
    KeyLockTable, LanguageTally, MissingAsset, ReconciliationEngine, ReconciliationReport,
    ReportBuilder,
};
pub use settings::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_DELAY_MS, Settings, SettingsError, SettingsUpdate,
    validate_settings,
};
pub use store::{AssetStore, StorageLayout, StoreError};
