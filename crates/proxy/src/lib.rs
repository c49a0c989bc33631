//! # bluebutton-proxy - FHIR proxy support layer
//!
//! This crate sits between API clients and a backend FHIR server. It shapes
//! error responses, normalizes the requested representation, checks which
//! resource types and interactions are exposed, and builds backend URLs.
//!
//! ## Request Pipeline
//!
//! 1. Query parameters are read in order ([`extractors::QueryParams`]).
//! 2. `_format` / `format` are collapsed into a single `_format=json|xml`
//!    ([`format::normalize_format`]).
//! 3. The resource type and interaction are checked against the supported
//!    resource table ([`access::check_access`]).
//! 4. The backend URL is assembled ([`urls::backend_url`]) and fetched
//!    ([`upstream::UpstreamClient`]).
//! 5. Backend error statuses are relayed as JSON envelopes
//!    ([`responses::error_status`]); anything else passes through.
//!
//! ## Error Handling
//!
//! Failures detected by the proxy itself are kickouts
//! ([`responses::Kickout`]) returned with `Content-Type: application/json`:
//!
//! | HTTP Status | Body |
//! |-------------|------|
//! | 301, 302 | `{code, errors: [reason]}` |
//! | 400, 500 | OperationOutcome, issue code `exception` |
//! | 401, 402, 403 | OperationOutcome, issue code `security` |
//! | 404 | OperationOutcome, issue code `not-found` |
//! | 501-504 | `{code, errors: [reason, label]}` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bluebutton_proxy::{ProxyConfig, create_app};
//! use bluebutton_proxy::access::StaticResourceTable;
//! use bluebutton_proxy::upstream::HttpUpstream;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ProxyConfig::default();
//!     let table = StaticResourceTable::from_file("resources.json")?;
//!     let upstream = HttpUpstream::new(config.timeout())?;
//!
//!     let app = create_app(table, upstream, config.clone());
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod config;
pub mod error;
pub mod extractors;
pub mod format;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;
pub mod upstream;
pub mod urls;

// Re-export commonly used types
pub use config::ProxyConfig;
pub use error::{KickoutResult, ProxyError, ProxyResult};
pub use responses::{Kickout, KickoutStatus};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::access::ResourceInteractionLookup;
use crate::upstream::UpstreamClient;

/// Creates the Axum application.
///
/// # Arguments
///
/// * `lookup` - The supported resource table
/// * `upstream` - The backend FHIR server client
/// * `config` - Proxy configuration
pub fn create_app<L, U>(lookup: L, upstream: U, config: ProxyConfig) -> Router
where
    L: ResourceInteractionLookup + 'static,
    U: UpstreamClient + 'static,
{
    info!(
        backend = %config.backend_url,
        prefix = %config.route_prefix,
        "Creating FHIR proxy"
    );

    let timeout = config.timeout();
    let state = AppState::new(Arc::new(lookup), Arc::new(upstream), config);
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::GATEWAY_TIMEOUT,
            timeout,
        ));

    router.layer(service_builder)
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("bluebutton_proxy={},tower_http=debug", level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
