//! Fastidious API Client
//!
//! Thin authenticated HTTP client for the Fastidious notes service. The
//! client attaches the session's bearer token to every call and otherwise
//! stays out of the way: no retries, no timeouts, and non-2xx responses are
//! returned to the caller as-is - the dispatch layer decides how to classify
//! them.
//!
//! # Example
//!
//! ```ignore
//! let client = FastidiousClient::new(ApiConfig::new("http://localhost:3000", "fst_abc"));
//! let response = client.get("/api/items/n1").await?;
//! if response.status().is_success() {
//!     let note: Note = response.json().await?;
//! }
//! ```

use crate::services::error::FastidiousError;
use reqwest::{Method, Response};
use serde_json::Value;

/// Per-session connection parameters for the Fastidious API
///
/// The token is fixed when the session is created and is used for every
/// remote call issued within that session.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Fastidious service, without a trailing slash
    pub base_url: String,
    /// Bearer token authenticating all calls for this session
    pub token: String,
}

impl ApiConfig {
    /// Create a config, normalizing away a trailing slash on the base URL
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
        }
    }
}

/// Authenticated HTTP client for one session's Fastidious calls
///
/// Pure with respect to configuration: everything a call needs comes from the
/// `ApiConfig` captured at construction, so instances are safely reentrant
/// and independent across sessions.
#[derive(Debug, Clone)]
pub struct FastidiousClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl FastidiousClient {
    /// Create a client bound to one session's (base URL, token) pair
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The config this client was created with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue a request against a relative API path
    ///
    /// Always sends `Authorization: Bearer <token>`. A JSON body implies a
    /// JSON content type. The response is returned whatever its status -
    /// callers classify non-success themselves.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, FastidiousError> {
        let url = format!("{}{}", self.config.base_url, path);

        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(&self.config.token);

        if !query.is_empty() {
            builder = builder.query(query);
        }

        if let Some(body) = body {
            // reqwest's json() also sets Content-Type: application/json
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(response)
    }

    /// GET a relative path
    pub async fn get(&self, path: &str) -> Result<Response, FastidiousError> {
        self.request(Method::GET, path, &[], None).await
    }

    /// GET a relative path with query parameters
    pub async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response, FastidiousError> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST a JSON body to a relative path
    pub async fn post(&self, path: &str, body: &Value) -> Result<Response, FastidiousError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body to a relative path
    pub async fn put(&self, path: &str, body: &Value) -> Result<Response, FastidiousError> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// DELETE a relative path
    pub async fn delete(&self, path: &str) -> Result<Response, FastidiousError> {
        self.request(Method::DELETE, path, &[], None).await
    }
}
