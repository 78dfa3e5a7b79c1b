//! Credential providers — where the bearer token comes from.
//!
//! The HTTP layer only sees [`CredentialProvider::token`]. It never touches
//! storage directly, so hosts can swap the browser session for a fixed
//! service token (or nothing at all) without changing the client.
//!
//! ## Malformed sessions
//!
//! A stored session that fails to parse is treated as "logged out" on the
//! request path: `token()` logs a warning and returns `None`. Callers that
//! need to tell the two apart (e.g. to send the user back to the login
//! page with a message) use [`SessionCredentials::read_session`], which
//! reports it as [`CredentialError::MalformedSession`].

mod provider;

pub use crate::error::CredentialError;
pub use provider::{Anonymous, SessionCredentials, StaticToken};

use std::sync::Arc;

/// Capability to produce the current bearer token.
///
/// Called once per outgoing request, possibly from several tasks at once.
pub trait CredentialProvider: Send + Sync {
    /// The token to send, or `None` when the request should go out
    /// unauthenticated. Never fails: unavailable credentials are `None`.
    fn token(&self) -> Option<String>;
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Box<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}
