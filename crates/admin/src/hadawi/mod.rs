//! Hadawi REST API client (the panel's `adminService`).
//!
//! Every screen of the admin panel reads and writes platform data through
//! this client. The panel keeps no database of its own.
//!
//! # API Reference
//!
//! - Base URL: `HADAWI_API_URL`, all paths live under `admin/`
//! - Authentication: `Authorization: Bearer <token>` from `POST admin/auth/login`
//! - Bodies: JSON; list endpoints accept `page`, `per_page`, `search`
//!
//! # Example
//!
//! ```rust,ignore
//! use hadawi_admin::hadawi::{HadawiClient, ListQuery};
//!
//! let client = HadawiClient::new(&config.api)?;
//! let page = client
//!     .list(&token, "occasions", &ListQuery { page: 1, per_page: 20, search: None })
//!     .await?;
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use hadawi_core::Email;

use crate::config::HadawiApiConfig;

/// Longest error body excerpt kept in [`HadawiError::Api`].
const MAX_ERROR_BODY: usize = 300;

/// Errors that can occur when interacting with the Hadawi API.
#[derive(Debug, Error)]
pub enum HadawiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token was rejected or the credentials were wrong (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The admin may not perform this action (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API rejected the submitted data (422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body could not be understood.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(String),
}

impl HadawiError {
    /// Whether the error means the session's token is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Hadawi REST API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct HadawiClient {
    inner: Arc<HadawiClientInner>,
}

struct HadawiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HadawiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &HadawiApiConfig) -> Result<Self, HadawiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hadawi-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(HadawiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange admin credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns `HadawiError::Unauthorized` or `HadawiError::Validation` when the
    /// credentials are rejected, `HadawiError::Http` on network failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginResponse, HadawiError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let response = self.inner.client.post(url).json(&body).send().await?;
        let envelope: LoginEnvelope = self.handle_response(response).await?;
        Ok(envelope.into())
    }

    /// Revoke a token on the API side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers treat this as best-effort.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &AccessToken) -> Result<(), HadawiError> {
        let url = self.endpoint(&["auth", "logout"])?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Fetch one page of a resource collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a record list.
    #[instrument(skip(self, token))]
    pub async fn list(
        &self,
        token: &AccessToken,
        resource: &str,
        query: &ListQuery,
    ) -> Result<RecordPage, HadawiError> {
        let mut url = self.endpoint(&[resource])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("per_page", &query.per_page.to_string());
            if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("search", search);
            }
        }
        let response: ListResponse = self.get_json(token, url).await?;
        Ok(RecordPage::from_response(response, query.page))
    }

    /// Fetch a single record.
    ///
    /// # Errors
    ///
    /// Returns `HadawiError::NotFound` if the record does not exist.
    #[instrument(skip(self, token))]
    pub async fn get(
        &self,
        token: &AccessToken,
        resource: &str,
        id: &str,
    ) -> Result<Record, HadawiError> {
        let url = self.endpoint(&[resource, id])?;
        let response: RecordResponse = self.get_json(token, url).await?;
        Ok(response.into())
    }

    /// Create a record.
    ///
    /// # Errors
    ///
    /// Returns `HadawiError::Validation` if the API rejects the fields.
    #[instrument(skip(self, token, fields))]
    pub async fn create(
        &self,
        token: &AccessToken,
        resource: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), HadawiError> {
        let url = self.endpoint(&[resource])?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose())
            .json(fields)
            .send()
            .await?;
        self.handle_empty(response).await
    }

    /// Update a record.
    ///
    /// # Errors
    ///
    /// Returns `HadawiError::Validation` if the API rejects the fields.
    #[instrument(skip(self, token, fields))]
    pub async fn update(
        &self,
        token: &AccessToken,
        resource: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), HadawiError> {
        let url = self.endpoint(&[resource, id])?;
        let response = self
            .inner
            .client
            .put(url)
            .bearer_auth(token.expose())
            .json(fields)
            .send()
            .await?;
        self.handle_empty(response).await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API refuses.
    #[instrument(skip(self, token))]
    pub async fn delete(
        &self,
        token: &AccessToken,
        resource: &str,
        id: &str,
    ) -> Result<(), HadawiError> {
        let url = self.endpoint(&[resource, id])?;
        let response = self
            .inner
            .client
            .delete(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Platform-wide statistics for the dashboard and analytics pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn statistics(&self, token: &AccessToken) -> Result<Vec<Figure>, HadawiError> {
        let url = self.endpoint(&["statistics"])?;
        let value: Value = self.get_json(token, url).await?;
        Ok(figures_from(&value))
    }

    /// Payment balance summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn balance(&self, token: &AccessToken) -> Result<Vec<Figure>, HadawiError> {
        let url = self.endpoint(&["payments", "balance"])?;
        let value: Value = self.get_json(token, url).await?;
        Ok(figures_from(&value))
    }

    /// Check that the API answers at all. Any response below 500 counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable or failing.
    pub async fn ping(&self) -> Result<(), HadawiError> {
        let response = self
            .inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await?;
        if response.status().is_server_error() {
            return Err(self.parse_error(response).await);
        }
        Ok(())
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Build `{base}/admin/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, HadawiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| HadawiError::Url(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push("admin")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        url: Url,
    ) -> Result<T, HadawiError> {
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, HadawiError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| HadawiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Handle a response whose body is not needed.
    async fn handle_empty(&self, response: reqwest::Response) -> Result<(), HadawiError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(self.parse_error(response).await)
    }

    /// Map an error response to a [`HadawiError`].
    async fn parse_error(&self, response: reqwest::Response) -> HadawiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        match status {
            StatusCode::UNAUTHORIZED => HadawiError::Unauthorized(message),
            StatusCode::FORBIDDEN => HadawiError::Forbidden(message),
            StatusCode::NOT_FOUND => HadawiError::NotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                HadawiError::Validation(message)
            }
            _ => HadawiError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl std::fmt::Debug for HadawiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HadawiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Login answers either with the payload directly or inside `{data: ...}`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LoginEnvelope {
    Wrapped { data: LoginResponse },
    Bare(LoginResponse),
}

impl From<LoginEnvelope> for LoginResponse {
    fn from(envelope: LoginEnvelope) -> Self {
        match envelope {
            LoginEnvelope::Wrapped { data } | LoginEnvelope::Bare(data) => data,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"message": ...}`, `{"error": ...}` and Laravel-style
/// `{"errors": {"field": ["..."]}}`; falls back to a truncated raw body.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::Object(errors)) = map.get("errors") {
            let details: Vec<String> = errors
                .values()
                .flat_map(|v| match v {
                    Value::Array(items) => items.iter().map(display_value).collect(),
                    other => vec![display_value(other)],
                })
                .filter(|s| !s.is_empty())
                .collect();
            if !details.is_empty() {
                return details.join("; ");
            }
        }
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "No details provided".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(base: &str) -> HadawiClient {
        HadawiClient::new(&HadawiApiConfig {
            base_url: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments_and_keeps_prefix() {
        let client = client("https://api.hadawi.app/v1/");
        let url = client.endpoint(&["occasions", "42/../x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hadawi.app/v1/admin/occasions/42%2F..%2Fx"
        );
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"message":"The email field is required."}"#),
            "The email field is required."
        );
        assert_eq!(
            error_message(r#"{"errors":{"name":["Name is required"],"rate":["Rate must be numeric"]}}"#),
            "Name is required; Rate must be numeric"
        );
        assert_eq!(error_message("  "), "No details provided");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_error_display() {
        let err = HadawiError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
        assert!(HadawiError::Unauthorized("expired".to_string()).is_unauthorized());
        assert!(!HadawiError::NotFound("x".to_string()).is_unauthorized());
    }
}
