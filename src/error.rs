//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
///
/// `InvalidUrl`, `InvalidHeader` and `Interceptor` are raised while building
/// a request and mean nothing was sent. The status variants describe the
/// server's answer.
#[cfg(feature = "http")]
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interceptor rejected request: {0}")]
    Interceptor(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request ({status}): {body}")]
    BadRequest { status: u16, body: String },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// Any other non-2xx answer (1xx, or a 3xx the transport did not follow).
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Errors reading the persisted session.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// A session record exists but is not valid JSON for a session.
    #[error("Malformed session record under key {key:?}: {source}")]
    MalformedSession {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// Session storage back-end errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL {0:?}: must start with http:// or https://")]
    InvalidBaseUrl(String),
}
