//! Key-value backend abstraction.
//!
//! Favorites are persisted as two string records, so the backend surface is
//! just `get` and `set` on string keys. Implementations decide where the
//! bytes live.

use crate::domain::error::Result;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON document on disk, atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local, used as a fallback and in tests
///
/// # Examples
///
/// ```no_run
/// use moviedeck::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonFileStore::open(PathBuf::from("/tmp/moviedeck/favorites.json"))?;
/// store.set("movie-favorites", "[550]")?;
/// assert_eq!(store.get("movie-favorites")?.as_deref(), Some("[550]"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the record stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Callers treat this as non-fatal.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
