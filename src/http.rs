//! HTTP transport for the Emma API.
//!
//! [`HttpAdapter`] is the production [`Adapter`]: it joins the account id and
//! the relative resource path onto a base URL, attaches the API key pair as
//! basic auth, and decodes JSON replies.
//!
//! # Example
//!
//! ```ignore
//! use myemma::{Account, Credentials, HttpAdapter, DEFAULT_BASE_URL};
//! use std::time::Duration;
//!
//! let credentials = Credentials::new("1234", "public", "private");
//! let adapter = HttpAdapter::new(credentials.clone(), DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let mut account = Account::new(credentials, adapter);
//! let groups = account.groups().fetch_all().await?;
//! ```

use crate::account::Credentials;
use async_trait::async_trait;
use resource_framework::{Adapter, AdapterError, Method, Params};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.e2ma.net";

/// `reqwest`-backed adapter. No retries.
#[derive(Debug, Clone)]
pub struct HttpAdapter {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpAdapter {
    /// Creates an adapter with a request timeout.
    ///
    /// # Errors
    /// Returns [`AdapterError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AdapterError::transport)?;
        Ok(Self::with_client(client, base_url, credentials))
    }

    /// Creates an adapter around a preconfigured `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a relative resource path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base_url, self.credentials.account_id, path)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let verb = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        self.client.request(verb, url).basic_auth(
            &self.credentials.public_key,
            Some(self.credentials.private_key()),
        )
    }
}

#[async_trait]
impl Adapter for HttpAdapter {
    async fn get(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.send(Method::Get, path, params).await
    }

    async fn post(&self, path: &str, data: &Params) -> Result<Value, AdapterError> {
        self.send(Method::Post, path, data).await
    }

    async fn put(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.send(Method::Put, path, params).await
    }

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, AdapterError> {
        self.send(Method::Delete, path, params).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<Value, AdapterError> {
        let url = self.url(path);
        debug!(%method, %url, "Sending request");

        let mut request = self.request(method, &url);
        request = match method {
            Method::Get | Method::Delete if params.is_empty() => request,
            Method::Get | Method::Delete => request.query(params),
            Method::Post | Method::Put => request.json(params),
        };

        let response = request.send().await.map_err(AdapterError::transport)?;
        let status = response.status();
        let text = response.text().await.map_err(AdapterError::transport)?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "Request failed");
            return Err(AdapterError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(AdapterError::transport)
    }
}
