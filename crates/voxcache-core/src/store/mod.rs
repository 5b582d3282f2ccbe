//! Filesystem-backed asset store.
//!
//! Lookups try every layout generation, newest first, and never touch the
//! disk beyond `stat`. Commits write only under the current generation,
//! through a temp file in the target directory that is renamed into place
//! once flushed, so a reader never sees a partial file.

mod error;
mod layout;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::{AssetRecord, CacheKey, VoiceGender};

pub use error::StoreError;
pub use layout::{
    FlatRoot, LayoutGeneration, PerCategory, PerGenderLanguage, PerLanguage, StorageLayout,
    asset_file_name,
};

/// Audio store rooted at one directory.
#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
    layout: StorageLayout,
    default_gender: VoiceGender,
}

impl AssetStore {
    /// Store with the standard layout and female as the write gender.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: StorageLayout::standard(),
            default_gender: VoiceGender::default(),
        }
    }

    /// Gender used when committing a key that names none.
    #[must_use]
    pub const fn with_default_gender(mut self, gender: VoiceGender) -> Self {
        self.default_gender = gender;
        self
    }

    /// Store root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Layout in use.
    #[must_use]
    pub const fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    fn writable_key(&self, key: &CacheKey) -> CacheKey {
        if key.gender().is_some() {
            key.clone()
        } else {
            key.clone().with_gender(self.default_gender)
        }
    }

    /// Where a commit of `key` would land.
    #[must_use]
    pub fn canonical_path(&self, key: &CacheKey) -> Option<PathBuf> {
        self.layout
            .current()
            .write_path(&self.root, &self.writable_key(key))
    }

    /// Find an existing non-empty asset for `key`.
    ///
    /// The record is tagged with the generation whose path matched and has
    /// `already_existed` set. No side effects.
    #[must_use]
    pub fn lookup(&self, key: &CacheKey) -> Option<AssetRecord> {
        for (generation, path) in self.layout.candidates(&self.root, key) {
            let Ok(meta) = std::fs::metadata(&path) else {
                continue;
            };
            if !meta.is_file() || meta.len() == 0 {
                continue;
            }
            tracing::debug!(
                target: "voxcache.store",
                key = %key,
                generation = %generation,
                path = %path.display(),
                "Asset found"
            );
            return Some(AssetRecord {
                key: key.clone(),
                path,
                size_bytes: meta.len(),
                already_existed: true,
                schema_generation: generation,
            });
        }
        None
    }

    /// Atomically write `bytes` as the asset for `key`.
    ///
    /// Parent directories are created as needed. Committing the same key
    /// twice replaces the file in place and yields the same path.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyPayload`] for empty `bytes` (nothing is created),
    /// [`StoreError::Write`] for any filesystem failure.
    pub fn commit(&self, key: &CacheKey, bytes: &[u8]) -> Result<AssetRecord, StoreError> {
        let key = self.writable_key(key);
        let current = self.layout.current();
        let Some(path) = current.write_path(&self.root, &key) else {
            return Err(StoreError::write(
                &self.root,
                format!("{} cannot place key {key}", current.generation()),
            ));
        };

        if bytes.is_empty() {
            return Err(StoreError::EmptyPayload { path });
        }

        let parent = path.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(parent).map_err(|e| StoreError::write(parent, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::write(parent, e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::write(tmp.path(), e))?;

        let written = tmp
            .as_file()
            .metadata()
            .map_err(|e| StoreError::write(tmp.path(), e))?
            .len();
        if written == 0 {
            return Err(StoreError::EmptyPayload { path });
        }

        tmp.persist(&path)
            .map_err(|e| StoreError::write(&path, e.error))?;

        tracing::info!(
            target: "voxcache.store",
            key = %key,
            path = %path.display(),
            size_bytes = written,
            "Asset committed"
        );

        Ok(AssetRecord {
            key,
            path,
            size_bytes: written,
            already_existed: false,
            schema_generation: current.generation(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, SchemaGeneration, VoiceAttributes};
    use crate::normalize::key_for;
    use tempfile::tempdir;

    fn en(raw: &str) -> CacheKey {
        key_for(raw, Language::En, VoiceAttributes::default()).unwrap()
    }

    #[test]
    fn lookup_misses_on_empty_store() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        assert!(store.lookup(&en("hello")).is_none());
    }

    #[test]
    fn commit_then_lookup() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let key = en("Hello");

        let record = store.commit(&key, b"ID3audio").unwrap();
        assert!(!record.already_existed);
        assert_eq!(record.size_bytes, 8);
        assert_eq!(record.schema_generation, SchemaGeneration::PerGenderLanguage);
        assert!(record.path.starts_with(dir.path().join("female").join("en")));

        let found = store.lookup(&key).unwrap();
        assert!(found.already_existed);
        assert_eq!(found.path, record.path);
    }

    #[test]
    fn commit_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let key = en("again");
        let a = store.commit(&key, b"abc").unwrap();
        let b = store.commit(&key, b"abc").unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.size_bytes, b.size_bytes);
    }

    #[test]
    fn empty_payload_creates_nothing() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let key = en("silence");
        let err = store.commit(&key, b"").unwrap_err();
        assert!(matches!(err, StoreError::EmptyPayload { .. }));
        assert!(!err.path().exists());
        assert!(!dir.path().join("female").exists());
    }

    #[test]
    fn zero_byte_files_are_not_hits() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let key = en("hollow");
        let path = store.canonical_path(&key).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"").unwrap();
        assert!(store.lookup(&key).is_none());
    }

    #[test]
    fn default_gender_controls_write_directory() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path()).with_default_gender(VoiceGender::Male);
        let record = store.commit(&en("hi"), b"x").unwrap();
        assert!(record.path.starts_with(dir.path().join("male")));
        assert_eq!(record.key.gender(), Some(VoiceGender::Male));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let record = store.commit(&en("tidy"), b"data").unwrap();
        let entries: Vec<_> = std::fs::read_dir(record.path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
