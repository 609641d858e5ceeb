//! Collaborator REST API client.
//!
//! Thin typed client over the backend's JSON endpoints. The storefront core
//! itself never performs network I/O; everything async lives here. Auth is a
//! bearer token passed explicitly per call - the client holds no session
//! state, so the [`crate::session::AuthSessionManager`] stays the single
//! owner of "who is logged in".
//!
//! A 401/403 from any authenticated call surfaces as
//! [`ApiError::Unauthorized`]; callers must report it to the session manager
//! (via `invalidate()`) so the stale token gets purged.

mod auth;
mod orders;
mod products;
mod users;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use orders::{Order, OrderItemRequest, OrderRequest, OrderUser};
pub use products::{CategoryRef, ProductPayload};
pub use users::BackendUser;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;

/// Errors from collaborator calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token (401/403).
    ///
    /// Callers must treat this as "session invalid" and tell the session
    /// manager, not retry.
    #[error("Session rejected by the backend (401/403)")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Any other non-success status, with the backend's body text.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered success but sent no body where one was required.
    #[error("Backend returned an empty response where a body was expected")]
    EmptyBody,

    /// A path could not be joined onto the configured base URL.
    #[error("Invalid endpoint path: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured backend.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(mut base_url: Url) -> Self {
        // Url::join drops the last path segment unless the base ends with a
        // slash; normalize once here so endpoint paths stay simple.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request and decode an optional JSON body.
    ///
    /// `Ok(None)` means the backend answered success with no content
    /// (204 or an empty body).
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            // The backend sends plain-text error messages
            // (e.g. "Nombre de usuario ya existe.")
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Backend error {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Send a request whose success response carries a required JSON body.
    async fn send_expecting<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(request).await?.ok_or(ApiError::EmptyBody)
    }

    /// Send a request whose success response body is irrelevant.
    async fn send_unit(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization_keeps_api_prefix() {
        let client = ApiClient::with_base_url("http://localhost:8080/api/v1".parse().unwrap());
        assert_eq!(
            client.endpoint("productos").unwrap().as_str(),
            "http://localhost:8080/api/v1/productos"
        );
        assert_eq!(
            client.endpoint("admin/productos/7").unwrap().as_str(),
            "http://localhost:8080/api/v1/admin/productos/7"
        );
    }

    #[test]
    fn test_base_url_with_trailing_slash_unchanged() {
        let client = ApiClient::with_base_url("http://localhost:8080/api/v1/".parse().unwrap());
        assert_eq!(
            client.endpoint("pedidos").unwrap().as_str(),
            "http://localhost:8080/api/v1/pedidos"
        );
    }
}
