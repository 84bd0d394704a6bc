/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for Task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::http::{Result, TaskboardError};
use crate::types::ErrorBody;

/// Base URL of a locally running Task API server
pub const DEFAULT_BASE_URL: &str = "http://localhost:7540";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the Task API
#[derive(Debug, Clone)]
pub struct TaskboardClient {
    http_client: Client,
    base_url: Url,
}

impl TaskboardClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client pointing at an explicit server
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TaskboardError::Config(format!(
                "base url cannot carry paths: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Server this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build request builder for public endpoints
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json"))
    }

    /// Build request builder for endpoints behind bearer auth
    pub(crate) fn request_with_token(
        &self,
        method: Method,
        endpoint: &str,
        token: &str,
    ) -> Result<RequestBuilder> {
        let builder = self.request(method, endpoint)?;
        Ok(builder.header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Send a request and decode a successful JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send_checked(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose successful body carries nothing of interest
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send_checked(builder).await.map(|_| ())
    }

    /// Send a request and return the trimmed plain-text body
    pub(crate) async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let body = self.send_checked(builder).await?;
        Ok(body.trim().to_string())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<String> {
        let response = builder.send().await?;
        read_success_body(response).await
    }
}

async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await?;
    debug!(%status, path = %url, bytes = body.len(), "task api response");

    if status.is_success() {
        return Ok(body);
    }

    Err(TaskboardError::api_error(status, error_message(status, &body)))
}

/// Pull the server's `{"error": ...}` text out of a failure body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.error.trim().is_empty() {
            return parsed.error.trim().to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
