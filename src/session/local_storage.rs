//! Browser `window.localStorage` session store (WASM).

use super::SessionStore;
use crate::error::StorageError;

/// Reads and writes the page's `localStorage`.
///
/// Holds no JS handles, so it is `Send + Sync`; the storage object is
/// looked up on each call (WASM is single-threaded).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global `window`".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl SessionStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
