//! Request interceptors — hooks run on every request before it is sent.

use crate::auth::CredentialProvider;
use crate::error::HttpError;
use crate::http::OutgoingRequest;

/// Hook run on every outgoing request before it is handed to the transport.
pub trait RequestInterceptor: Send + Sync {
    /// Inspect or modify the request. Returning `Err` aborts the request.
    fn on_request(&self, request: OutgoingRequest) -> Result<OutgoingRequest, HttpError>;

    /// Called with any error raised while preparing the request. The
    /// default hands it back untouched.
    fn on_request_error(&self, error: HttpError) -> HttpError {
        error
    }
}

/// Attaches `Authorization: Bearer <token>` when the provider has a token,
/// and leaves the request alone otherwise.
#[derive(Debug, Clone)]
pub struct BearerAuth<P> {
    provider: P,
}

impl<P: CredentialProvider> BearerAuth<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: CredentialProvider> RequestInterceptor for BearerAuth<P> {
    fn on_request(&self, mut request: OutgoingRequest) -> Result<OutgoingRequest, HttpError> {
        if let Some(token) = self.provider.token().filter(|t| !t.is_empty()) {
            request.set_bearer(&token)?;
        }
        Ok(request)
    }
}
