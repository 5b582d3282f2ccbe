//! Core domain types.
//!
//! These types represent the pure domain model, independent of the
//! filesystem layout and of any speech provider.
//!
//! # Structure
//!
//! - `language` / `voice` - request attributes (`Language`, `VoiceGender`, `VoiceParams`)
//! - `key` - `CacheKey`, the structural identity of an asset
//! - `record` - `AssetRecord` and `SchemaGeneration`
//! - `corpus` - ordered phrase corpus input
//! - `request` - untyped request boundary

mod corpus;
mod error;
mod key;
mod language;
mod record;
mod request;
mod voice;

pub use corpus::{Corpus, CorpusEntry, CorpusError, PhraseSide};
pub use error::ValidationError;
pub use key::{CacheKey, LegacyHints};
pub use language::Language;
pub use record::{AssetRecord, SchemaGeneration};
pub use request::SynthesisRequest;
pub use voice::{VoiceAttributes, VoiceGender, VoiceParams};
