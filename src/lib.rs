//! # Seed Admin SDK
//!
//! Client-side plumbing for the Seed admin backend, usable from native
//! binaries and from WASM front-ends.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Errors, configuration, session storage (always available, WASM-safe)
//! 2. **Auth** — `CredentialProvider` capability backed by the stored session
//! 3. **HTTP API** — `ApiClient` with a request-interceptor chain that attaches
//!    `Authorization: Bearer <token>` to every outgoing request
//!
//! ## Features
//!
//! - `http` (default) — `ApiClient`, without a TLS backend
//! - `native` — `http` + rustls; needed for `https://` base URLs such as
//!   [`config::DEFAULT_API_URL`]
//! - `wasm` — `http` + browser `localStorage` session store (the browser
//!   provides TLS)
//!
//! ## Quick Start
//!
//! ```toml
//! seed-admin-sdk = { version = "0.1", features = ["native"] }
//! ```
//!
//! ```rust,ignore
//! use seed_admin_sdk::prelude::*;
//!
//! let config = AppConfig::from_env();
//! let store = FileStore::new("/var/lib/seed-admin");
//!
//! let api = ApiClient::builder()
//!     .config(config.api)
//!     .credentials(SessionCredentials::new(store))
//!     .build()?;
//!
//! let users: serde_json::Value = api.get("/users").await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types.
pub mod error;

/// Application configuration: API base URL, theme palette, branding.
pub mod config;

/// Persisted session record and the key-value stores it lives in.
pub mod session;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Credential providers: where the bearer token comes from.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with request interceptors.
#[cfg(feature = "http")]
pub mod http;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Errors
    pub use crate::error::{ConfigError, CredentialError, SdkError, StorageError};

    // Config
    pub use crate::config::{ApiConfig, AppConfig, Branding, Palette, Theme, DEFAULT_API_URL};

    // Session storage
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::session::FileStore;
    #[cfg(feature = "wasm-storage")]
    pub use crate::session::LocalStorage;
    pub use crate::session::{MemoryStore, SessionRecord, SessionStore, SESSION_KEY};

    // Auth
    pub use crate::auth::{Anonymous, CredentialProvider, SessionCredentials, StaticToken};

    // HTTP client + interceptors
    #[cfg(feature = "http")]
    pub use crate::error::HttpError;
    #[cfg(feature = "http")]
    pub use crate::http::{
        ApiClient, ApiClientBuilder, BearerAuth, OutgoingRequest, RequestInterceptor,
    };
}
