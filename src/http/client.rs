//! `ApiClient` — base URL + interceptor chain over a shared `reqwest::Client`.
//!
//! Every request runs through the interceptors in registration order, is
//! resolved against the base URL, then dispatched. Nothing is retried and
//! response errors are reported, not recovered from.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::CredentialProvider;
use crate::config::ApiConfig;
use crate::error::{HttpError, SdkError};
use crate::http::interceptor::{BearerAuth, RequestInterceptor};
use crate::http::request::OutgoingRequest;

/// HTTP client for the admin backend.
///
/// Cloning is cheap: clones share the connection pool and the interceptor
/// chain, so build one per process and hand out clones.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Unauthenticated client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Verbs ────────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.send(OutgoingRequest::get(path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.send(OutgoingRequest::delete(path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.send_with_body(Method::POST, path, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.send_with_body(Method::PUT, path, body).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.send_with_body(Method::PATCH, path, body).await
    }

    async fn send_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let request = OutgoingRequest::new(method, path)
            .json(body)
            .map_err(|e| self.signal_request_error(e))?;
        self.send(request).await
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Send `request` and decode a successful JSON response.
    ///
    /// Non-2xx answers become `Unauthorized` / `NotFound` / `BadRequest` /
    /// `ServerError` / `UnexpectedStatus`. An empty 2xx body decodes as JSON `null`.
    pub async fn send<T: DeserializeOwned>(&self, request: OutgoingRequest) -> Result<T, HttpError> {
        let resp = self.send_raw(request).await?;
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await?;
            let parsed = if bytes.is_empty() {
                serde_json::from_value(serde_json::Value::Null)?
            } else {
                serde_json::from_slice(&bytes)?
            };
            return Ok(parsed);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(status_error(status, body_text))
    }

    /// Send `request` and hand back the response as-is, whatever its status.
    pub async fn send_raw(&self, request: OutgoingRequest) -> Result<reqwest::Response, HttpError> {
        let request = self.build_request(request)?;
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            authenticated = request.headers().contains_key(reqwest::header::AUTHORIZATION),
            "Dispatching request"
        );
        Ok(self.client.execute(request).await?)
    }

    /// Run the interceptor chain and resolve the request against the base
    /// URL, without sending it.
    pub fn build_request(&self, request: OutgoingRequest) -> Result<reqwest::Request, HttpError> {
        let request = self.intercept(request)?;
        let url = self.resolve(&request.path);

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
            .build()
            .map_err(|e| self.signal_request_error(HttpError::InvalidUrl(e.to_string())))
    }

    /// Apply every interceptor in order. On the first failure, the error is
    /// passed through each interceptor's error hook and returned.
    pub fn intercept(&self, request: OutgoingRequest) -> Result<OutgoingRequest, HttpError> {
        self.interceptors
            .iter()
            .try_fold(request, |req, interceptor| interceptor.on_request(req))
            .map_err(|e| self.signal_request_error(e))
    }

    fn signal_request_error(&self, error: HttpError) -> HttpError {
        self.interceptors
            .iter()
            .fold(error, |err, interceptor| interceptor.on_request_error(err))
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn status_error(status: StatusCode, body: String) -> HttpError {
    match status.as_u16() {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        code @ 400..=499 => HttpError::BadRequest { status: code, body },
        code @ 500..=599 => HttpError::ServerError { status: code, body },
        code => HttpError::UnexpectedStatus { status: code, body },
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct ApiClientBuilder {
    config: ApiConfig,
    credentials: Option<Arc<dyn CredentialProvider>>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    /// Replace the whole transport config (base URL included).
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach bearer tokens from `provider`. Its interceptor runs before
    /// any added with [`interceptor`](Self::interceptor).
    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    pub fn interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> Result<ApiClient, SdkError> {
        let base_url = self.config.normalized_base_url()?;

        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.config.timeout() {
                builder = builder.timeout(timeout);
            }
            if let Some(user_agent) = &self.config.user_agent {
                builder = builder.user_agent(user_agent.clone());
            }
        }
        let client = builder.build().map_err(HttpError::from)?;

        let mut interceptors: Vec<Arc<dyn RequestInterceptor>> = Vec::new();
        if let Some(provider) = self.credentials {
            interceptors.push(Arc::new(BearerAuth::new(provider)));
        }
        interceptors.extend(self.interceptors);

        tracing::debug!(
            base_url = %base_url,
            interceptors = interceptors.len(),
            "Built API client"
        );

        Ok(ApiClient {
            base_url,
            client,
            interceptors: Arc::new(interceptors),
        })
    }
}
