//! In-memory token storage - used in tests and for sessions that should not
//! outlive the process.

use std::collections::HashMap;
use std::sync::RwLock;

use todo_core::ports::{StorageError, TokenStorage};

/// In-memory storage using a HashMap behind a RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryTokenStorage {
    store: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.store.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().ok()?;
        store.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = self
            .store
            .write()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self
            .store
            .write()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        store.remove(key);
        Ok(())
    }
}
