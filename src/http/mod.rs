//! HTTP client layer — `ApiClient` with a request-interceptor chain.

pub mod client;
pub mod interceptor;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder};
pub use interceptor::{BearerAuth, RequestInterceptor};
pub use request::OutgoingRequest;
