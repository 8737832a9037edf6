//! Shared HTTP connection to the CRM REST API.
//!
//! [`CrmApi`] owns the [`reqwest::Client`], base URL and bearer token.
//! Entity services borrow it to build URLs and to turn responses into
//! typed results or a [`ClientError`].

use cwcrm_core::{DbId, Entity, EntityKind};
use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, StatusCode};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::EntityService;

/// Header the server uses to carry an alert key for failed requests.
pub const ALERT_ERROR_HEADER: &str = "x-cwcrmapp-error";

/// HTTP connection to one CRM server.
///
/// Cheap to clone: the inner [`reqwest::Client`] is reference counted, so
/// every entity service shares one connection pool.
#[derive(Debug, Clone)]
pub struct CrmApi {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl CrmApi {
    /// Build a client from configuration, applying the request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Create an API handle reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base HTTP URL, e.g. `http://localhost:8080`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// CRUD service for entity type `E` sharing this connection.
    pub fn service<E: Entity>(&self) -> EntityService<E> {
        EntityService::new(self.clone())
    }

    /// `/api/<entities>`
    pub fn resource_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.api_url, kind.resource())
    }

    /// `/api/<entities>/<id>`
    pub fn record_url(&self, kind: EntityKind, id: DbId) -> String {
        format!("{}/api/{}/{}", self.api_url, kind.resource(), id)
    }

    /// `/api/_search/<entities>`
    pub fn search_url(&self, kind: EntityKind) -> String {
        format!("{}/api/_search/{}", self.api_url, kind.resource())
    }

    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ---- response helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] carrying
    /// the extracted message on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(status, &headers, &body),
        })
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Pick the most useful message for a failed response.
///
/// Order: the alert header, then `detail`, `title` or `message` from a
/// JSON problem body, then the raw body, then the status reason phrase.
pub fn error_message(status: StatusCode, headers: &HeaderMap, body: &str) -> String {
    if let Some(alert) = headers
        .get(ALERT_ERROR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return alert.to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "title", "message"] {
            if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}
