//! `OutgoingRequest` — the mutable description of a request before dispatch.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::Serialize;

use crate::error::HttpError;

/// A request as interceptors see it: not yet bound to a transport.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    /// Path relative to the client's base URL, or an absolute
    /// `http(s)://` URL which bypasses the base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl OutgoingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header, validating name and value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, HttpError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous value.
    /// The header is marked sensitive so it is redacted from `Debug` output.
    pub fn set_bearer(&mut self, token: &str) -> Result<(), HttpError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            HttpError::InvalidHeader {
                name: AUTHORIZATION.as_str().to_string(),
                reason: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Current `Authorization` header, if any.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Whether `path` is an absolute URL.
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }
}
