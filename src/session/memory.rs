//! In-process session store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::SessionStore;
use crate::error::StorageError;

/// `HashMap` behind a `RwLock`. Useful for tests and for hosts that hand
/// the session over at start-up instead of persisting it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self {
            items: RwLock::new(items),
        }
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }
}
