//! A backend client that records calls and answers with a canned response.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use bluebutton_proxy::upstream::{UpstreamClient, UpstreamResponse};
use bluebutton_proxy::{ProxyError, ProxyResult};

/// What the mock answers with.
#[derive(Debug, Clone)]
enum Reply {
    Response(UpstreamResponse),
    Failure(String),
}

/// Recording backend client.
#[derive(Debug, Clone)]
pub struct MockUpstream {
    reply: Reply,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Answers every call with `response`.
    pub fn responding(response: UpstreamResponse) -> Self {
        Self {
            reply: Reply::Response(response),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every call with `200 OK` and a FHIR JSON body.
    pub fn ok_json(body: &str) -> Self {
        Self::responding(
            UpstreamResponse::new(StatusCode::OK, body).with_content_type("application/fhir+json"),
        )
    }

    /// Fails every call as if the backend were unreachable.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Failure(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstream {
    async fn get(&self, url: &str) -> ProxyResult<UpstreamResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Failure(message) => Err(ProxyError::Upstream {
                message: message.clone(),
            }),
        }
    }
}
