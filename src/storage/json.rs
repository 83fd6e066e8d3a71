//! JSON file-based key-value backend.
//!
//! All records live in one human-readable JSON document. Writes go to a
//! temporary file first and are renamed over the target, so a crash never
//! leaves a half-written document behind.

use crate::domain::error::{MovieDeckError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk document format.
///
/// ```json
/// {
///   "version": 1,
///   "records": {
///     "movie-favorites": "[550,680]",
///     "movie-favorite-movies": "[{\"id\":550,...}]"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Document {
    /// Version of the document format for future migrations.
    version: u32,

    #[serde(default)]
    records: BTreeMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: 1,
            records: BTreeMap::new(),
        }
    }
}

/// JSON file key-value backend.
///
/// The document is loaded once on open and kept in memory; every `set`
/// rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: Document,
}

impl JsonFileStore {
    /// Opens the document at `file_path`, creating parent directories.
    ///
    /// A missing file starts an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening favorites document");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty document");
            Document::default()
        };

        Ok(Self { file_path, data })
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<Document> {
        let contents = std::fs::read_to_string(path)?;
        let data: Document = serde_json::from_str(&contents)
            .map_err(|e| MovieDeckError::Persistence(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            records = data.records.len(),
            "loaded favorites document"
        );

        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| MovieDeckError::Persistence(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, bytes = value.len()).entered();

        let previous = self.data.records.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.save_to_file() {
            match previous {
                Some(previous) => self.data.records.insert(key.to_owned(), previous),
                None => self.data.records.remove(key),
            };
            return Err(e);
        }

        tracing::debug!("record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("movie-favorites").unwrap(), None);
        store.set("movie-favorites", "[1,2]").unwrap();
        store.set("movie-favorites", "[2]").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(reopened.get("movie-favorites").unwrap().as_deref(), Some("[2]"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_document_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::open(path).unwrap_err();
        assert!(matches!(err, MovieDeckError::Persistence(_)));
    }

    #[test]
    fn failed_write_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("movie-favorites", "[1]").unwrap();

        // A directory at the temp path makes the write fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(store.set("movie-favorites", "[1,2]").is_err());
        assert_eq!(store.get("movie-favorites").unwrap().as_deref(), Some("[1]"));
    }
}
