//! Backend FHIR server client.
//!
//! The proxy only issues GETs against the backend. [`UpstreamClient`] is the
//! seam handlers call through; [`HttpUpstream`] is the `reqwest`
//! implementation used by the server binary.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use tracing::debug;

use crate::error::{ProxyError, ProxyResult};

/// A buffered response from the backend FHIR server.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl UpstreamResponse {
    /// Creates a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response from already collected parts.
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Sets the Content-Type header.
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        self
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Returns the Content-Type header, if present and valid text.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Returns true when the backend labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
    }
}

/// A client able to GET from the backend FHIR server.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Performs a GET against a fully built backend URL.
    async fn get(&self, url: &str) -> ProxyResult<UpstreamResponse>;
}

/// [`UpstreamClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Creates a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> ProxyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Upstream {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn get(&self, url: &str) -> ProxyResult<UpstreamResponse> {
        debug!(url = %url, "Calling backend FHIR server");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream {
                message: e.to_string(),
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| ProxyError::Upstream {
            message: format!("Failed to read backend response: {}", e),
        })?;

        debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");

        Ok(UpstreamResponse::from_parts(status, headers, body))
    }
}
