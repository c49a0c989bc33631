//! Error types for the proxy.
//!
//! Request-level failures are [`Kickout`]s and render straight to JSON.
//! [`ProxyError`] covers infrastructure failures (backend transport,
//! resource table loading, URL assembly) and converts into a kickout when
//! it has to reach a client:
//!
//! | ProxyError | HTTP Status |
//! |------------|-------------|
//! | Upstream | 502 |
//! | InvalidId | 400 |
//! | everything else | 500 |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::responses::kickout::{Kickout, kickout_400, kickout_500, kickout_502};

/// Infrastructure errors raised outside the request/response contract.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The backend FHIR server could not be reached or read.
    #[error("upstream request failed: {message}")]
    Upstream { message: String },

    /// The resource table file could not be read.
    #[error("failed to read resource table {path}: {source}")]
    ResourceTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource table is not a valid JSON array of records.
    #[error("invalid resource table: {0}")]
    ResourceTableParse(#[from] serde_json::Error),

    /// An entity or version id is not a valid FHIR id.
    #[error("{id} is not a valid FHIR id.")]
    InvalidId { id: String },

    /// The backend base URL or an assembled URL is malformed.
    #[error("invalid backend URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result type for proxy infrastructure operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Result type for request handlers.
pub type KickoutResult<T> = Result<T, Kickout>;

impl From<ProxyError> for Kickout {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::Upstream { message } => kickout_502(message),
            err @ ProxyError::InvalidId { .. } => kickout_400(err.to_string()),
            other => kickout_500(other.to_string()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        Kickout::from(self).into_response()
    }
}
