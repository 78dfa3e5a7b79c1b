//! Persisted session record and the key-value stores it lives in.
//!
//! The login flow (outside this crate) writes a JSON object under
//! [`SESSION_KEY`]. This crate only ever reads it back: once per outgoing
//! request, so a login or logout elsewhere takes effect immediately.

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(feature = "wasm-storage")]
mod local_storage;
#[cfg(feature = "wasm-storage")]
pub use local_storage::LocalStorage;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::StorageError;

/// Storage key the session record is kept under.
pub const SESSION_KEY: &str = "user_session";

// ─── SessionRecord ───────────────────────────────────────────────────────────

/// The logged-in user's persisted session.
///
/// Only `token` is interpreted. Whatever else the login flow stored (user
/// id, name, role, ...) is kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionRecord {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Parse the stored representation.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The bearer token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

// ─── SessionStore ────────────────────────────────────────────────────────────

/// A string key-value store that outlives the process (browser
/// `localStorage`, a directory on disk) or an in-memory stand-in.
///
/// Reads must be safe to run concurrently with each other.
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
