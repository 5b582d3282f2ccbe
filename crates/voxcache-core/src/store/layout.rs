//! Storage layout: the ordered set of path-derivation rules.
//!
//! The audio tree went through four directory schemes. Each one is kept as a
//! pure strategy so that assets written under any of them remain readable.
//! Only the newest is ever written to.
//!
//! | Gen | Path | Hashed text |
//! |-----|------|-------------|
//! | G3 | `{gender}/{lang}/{lang}_{md5}.mp3` | normalized |
//! | G2 | `{lang}/{lang}_{md5}.mp3` | normalized |
//! | G1 | `{category}/{lang}_{md5}.mp3` | as typed, then normalized |
//! | G0 | `{lang}_{md5}.mp3` | as typed, then normalized |

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{CacheKey, Language, SchemaGeneration, VoiceGender};

/// `{lang}_{md5hex(text)}.mp3`
#[must_use]
pub fn asset_file_name(language: Language, text: &str) -> String {
    format!("{}_{:x}.mp3", language.code(), md5::compute(text.as_bytes()))
}

/// Texts a raw-hash generation should try: as typed first, then normalized.
fn raw_then_normalized(key: &CacheKey) -> Vec<&str> {
    let source = key.source_text();
    let normalized = key.normalized_text();
    if source == normalized {
        vec![source]
    } else {
        vec![source, normalized]
    }
}

/// One historical path-derivation rule.
pub trait LayoutGeneration: Send + Sync + fmt::Debug {
    /// Which generation this rule implements.
    fn generation(&self) -> SchemaGeneration;

    /// Paths where an asset for `key` may live, most likely first.
    ///
    /// Empty when the key lacks an input this generation needs.
    fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<PathBuf>;

    /// The single path a new asset for `key` would be written to.
    fn write_path(&self, root: &Path, key: &CacheKey) -> Option<PathBuf>;
}

/// G3: per gender, then per language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerGenderLanguage;

impl PerGenderLanguage {
    fn path(root: &Path, gender: VoiceGender, key: &CacheKey) -> PathBuf {
        let lang = key.language().code();
        root.join(gender.as_str())
            .join(lang)
            .join(asset_file_name(key.language(), key.normalized_text()))
    }
}

impl LayoutGeneration for PerGenderLanguage {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::PerGenderLanguage
    }

    fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<PathBuf> {
        match key.gender() {
            Some(gender) => vec![Self::path(root, gender, key)],
            None => VoiceGender::SEARCH_ORDER
                .iter()
                .map(|g| Self::path(root, *g, key))
                .collect(),
        }
    }

    fn write_path(&self, root: &Path, key: &CacheKey) -> Option<PathBuf> {
        key.gender().map(|g| Self::path(root, g, key))
    }
}

/// G2: per language, normalized hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerLanguage;

impl LayoutGeneration for PerLanguage {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::PerLanguage
    }

    fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<PathBuf> {
        self.write_path(root, key).into_iter().collect()
    }

    fn write_path(&self, root: &Path, key: &CacheKey) -> Option<PathBuf> {
        Some(
            root.join(key.language().code())
                .join(asset_file_name(key.language(), key.normalized_text())),
        )
    }
}

/// G1: per corpus category. Only reachable when the caller knows the category.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerCategory;

impl LayoutGeneration for PerCategory {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::PerCategory
    }

    fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<PathBuf> {
        let Some(category) = key.legacy().category.as_deref() else {
            return Vec::new();
        };
        let dir = root.join(category);
        raw_then_normalized(key)
            .into_iter()
            .map(|text| dir.join(asset_file_name(key.language(), text)))
            .collect()
    }

    fn write_path(&self, root: &Path, key: &CacheKey) -> Option<PathBuf> {
        let category = key.legacy().category.as_deref()?;
        Some(
            root.join(category)
                .join(asset_file_name(key.language(), key.source_text())),
        )
    }
}

/// G0: everything in the root directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRoot;

impl LayoutGeneration for FlatRoot {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::FlatRoot
    }

    fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<PathBuf> {
        raw_then_normalized(key)
            .into_iter()
            .map(|text| root.join(asset_file_name(key.language(), text)))
            .collect()
    }

    fn write_path(&self, root: &Path, key: &CacheKey) -> Option<PathBuf> {
        Some(root.join(asset_file_name(key.language(), key.source_text())))
    }
}

/// Ordered generations, newest first.
#[derive(Debug)]
pub struct StorageLayout {
    generations: Vec<Box<dyn LayoutGeneration>>,
}

impl StorageLayout {
    /// G3, G2, G1, G0.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            generations: vec![
                Box::new(PerGenderLanguage),
                Box::new(PerLanguage),
                Box::new(PerCategory),
                Box::new(FlatRoot),
            ],
        }
    }

    /// The generation used for writes.
    #[must_use]
    pub fn current(&self) -> &dyn LayoutGeneration {
        self.generations[0].as_ref()
    }

    /// Every candidate path for `key`, in lookup order, tagged with its generation.
    #[must_use]
    pub fn candidates(&self, root: &Path, key: &CacheKey) -> Vec<(SchemaGeneration, PathBuf)> {
        self.generations
            .iter()
            .flat_map(|g| {
                let generation = g.generation();
                g.candidates(root, key)
                    .into_iter()
                    .map(move |path| (generation, path))
            })
            .collect()
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VoiceAttributes;
    use crate::normalize::key_for;

    fn key(raw: &str, gender: Option<VoiceGender>) -> CacheKey {
        let voice = VoiceAttributes {
            gender,
            voice_name: None,
        };
        key_for(raw, Language::En, voice).unwrap()
    }

    #[test]
    fn file_name_is_language_and_md5() {
        // md5("hello") = 5d41402abc4b2a76b9719d911017c592
        assert_eq!(
            asset_file_name(Language::En, "hello"),
            "en_5d41402abc4b2a76b9719d911017c592.mp3"
        );
    }

    #[test]
    fn current_generation_writes_under_gender_and_language() {
        let layout = StorageLayout::standard();
        let root = Path::new("/audio");
        let path = layout
            .current()
            .write_path(root, &key("Hello", Some(VoiceGender::Male)))
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/audio/male/en/en_5d41402abc4b2a76b9719d911017c592.mp3")
        );
    }

    #[test]
    fn lookup_order_is_newest_first() {
        let layout = StorageLayout::standard();
        let k = key("Hello", Some(VoiceGender::Female)).with_category("greetings");
        let gens: Vec<_> = layout
            .candidates(Path::new("/a"), &k)
            .into_iter()
            .map(|(g, _)| g)
            .collect();
        assert_eq!(
            gens,
            vec![
                SchemaGeneration::PerGenderLanguage,
                SchemaGeneration::PerLanguage,
                SchemaGeneration::PerCategory,
                SchemaGeneration::PerCategory,
                SchemaGeneration::FlatRoot,
                SchemaGeneration::FlatRoot,
            ]
        );
    }

    #[test]
    fn genderless_key_searches_both_genders() {
        let paths = PerGenderLanguage.candidates(Path::new("/a"), &key("hi", None));
        assert_eq!(paths.len(), 2);
        assert!(paths[0].starts_with("/a/female"));
        assert!(paths[1].starts_with("/a/male"));
        assert!(PerGenderLanguage.write_path(Path::new("/a"), &key("hi", None)).is_none());
    }

    #[test]
    fn per_category_requires_category() {
        assert!(PerCategory.candidates(Path::new("/a"), &key("hi", None)).is_empty());
    }

    #[test]
    fn raw_generations_hash_typed_text_first() {
        let k = key("  Hello  ", None);
        let paths = FlatRoot.candidates(Path::new("/a"), &k);
        assert_eq!(paths[0], Path::new("/a").join(asset_file_name(Language::En, "Hello")));
        assert_eq!(paths[1], Path::new("/a").join(asset_file_name(Language::En, "hello")));
    }
}
