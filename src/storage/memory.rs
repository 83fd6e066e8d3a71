use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, String>,
    writes: usize,
}

/// Process-local backend. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Number of successful `set` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.records.insert(key.to_owned(), value.to_owned());
        inner.writes += 1;
        Ok(())
    }
}
