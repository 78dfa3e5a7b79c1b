use super::CredentialProvider;
use crate::error::CredentialError;
use crate::session::{SessionRecord, SessionStore, SESSION_KEY};

// ─── SessionCredentials ──────────────────────────────────────────────────────

/// Reads the token from the persisted session record on every call.
#[derive(Debug, Clone)]
pub struct SessionCredentials<S> {
    store: S,
    key: String,
}

impl<S: SessionStore> SessionCredentials<S> {
    /// Provider reading [`SESSION_KEY`] from `store`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and parse the stored session.
    ///
    /// `Ok(None)` when nothing (or an empty value) is stored. A value that
    /// does not parse is [`CredentialError::MalformedSession`].
    pub fn read_session(&self) -> Result<Option<SessionRecord>, CredentialError> {
        let raw = match self.store.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        SessionRecord::parse(&raw)
            .map(Some)
            .map_err(|source| CredentialError::MalformedSession {
                key: self.key.clone(),
                source,
            })
    }
}

impl<S: SessionStore> CredentialProvider for SessionCredentials<S> {
    fn token(&self) -> Option<String> {
        match self.read_session() {
            Ok(record) => record.and_then(|r| r.token().map(str::to_string)),
            Err(e) => {
                tracing::warn!(key = %self.key, "Ignoring stored session: {}", e);
                None
            }
        }
    }
}

// ─── StaticToken ─────────────────────────────────────────────────────────────

/// A fixed token, e.g. a service account's.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

// Token stays out of logs.
impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}

// ─── Anonymous ───────────────────────────────────────────────────────────────

/// Never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}
