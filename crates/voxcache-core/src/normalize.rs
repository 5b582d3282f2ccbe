//! Text normalization and cache-key derivation.
//!
//! Normalization is a pure function: annotations in `(...)` or `[...]` are
//! removed, whitespace runs collapse to one space, the result is trimmed and
//! lower-cased. Hashing is not done here; each storage generation hashes
//! its own input.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{CacheKey, Language, ValidationError, VoiceAttributes};

/// Innermost bracketed or parenthesized annotation.
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^()]*\)|\[[^\[\]]*\]").expect("annotation pattern is a valid regex")
});

/// Strip annotations until none remain, so nested ones go too.
fn strip_annotations(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = ANNOTATION.replace_all(&current, " ");
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}

/// Produce the canonical form of a phrase.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`] when nothing is left after
/// annotations and whitespace are removed.
pub fn normalize(raw: &str) -> Result<String, ValidationError> {
    let stripped = strip_annotations(raw);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let normalized = collapsed.to_lowercase();
    if normalized.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(normalized)
}

/// Normalize an untyped JSON value that should hold phrase text.
///
/// # Errors
///
/// [`ValidationError::InvalidInput`] for non-string values, otherwise as
/// [`normalize`].
pub fn normalize_value(value: &serde_json::Value) -> Result<String, ValidationError> {
    match value {
        serde_json::Value::String(text) => normalize(text),
        other => Err(ValidationError::invalid_input("text", other)),
    }
}

/// Build a key from normalized text. Pure structural constructor.
#[must_use]
pub fn derive_key(normalized_text: &str, language: Language, voice: VoiceAttributes) -> CacheKey {
    CacheKey::new(normalized_text, language, voice)
}

/// Normalize raw text and derive its key, remembering the raw text for
/// generations that hashed it unnormalized.
///
/// # Errors
///
/// As [`normalize`].
pub fn key_for(
    raw: &str,
    language: Language,
    voice: VoiceAttributes,
) -> Result<CacheKey, ValidationError> {
    let normalized = normalize(raw)?;
    Ok(derive_key(&normalized, language, voice).with_source_text(raw))
}
