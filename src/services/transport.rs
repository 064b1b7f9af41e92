//! HTTP transport
//!
//! Network boundary shared by the LLM, wallet and routing clients

use crate::models::chat::error_message;
use crate::utils::error::{ClientError, ClientResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Raw HTTP response, body not yet interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn http_error(&self) -> ClientError {
        ClientError::Http {
            status_code: self.status,
            status_text: self.status_text.clone(),
        }
    }

    /// Parse the body as JSON, letting a server `error` field win over the status
    ///
    /// Non-success without an `error` field gives [`ClientError::Http`];
    /// success with a non-JSON body gives [`ClientError::MalformedResponse`].
    pub fn into_checked_json(self) -> ClientResult<Value> {
        let parsed = serde_json::from_str::<Value>(&self.body).ok();

        if let Some(message) = parsed
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(error_message)
        {
            return Err(ClientError::Remote { message });
        }

        if !self.is_success() {
            return Err(self.http_error());
        }

        parsed.ok_or(ClientError::MalformedResponse)
    }

    /// Fail on non-success status without looking at the body
    pub fn ensure_success(self) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.http_error())
        }
    }
}

/// Network boundary
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body
    async fn post_json(&self, url: &str, body: &Value, request_id: &str) -> ClientResult<TransportResponse>;

    /// GET with query parameters
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<TransportResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests fail after `timeout_secs`
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("smarttravel-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn execute(request: RequestBuilder) -> ClientResult<TransportResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Received HTTP {} ({} bytes)", status.as_u16(), body.len());

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value, request_id: &str) -> ClientResult<TransportResponse> {
        let request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-Request-Id", request_id)
            .json(body);

        Self::execute(request).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<TransportResponse> {
        Self::execute(self.client.get(url).query(query)).await
    }
}
