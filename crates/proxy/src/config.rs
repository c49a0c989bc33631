//! Proxy configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PROXY_SERVER_PORT` | 8080 | Server port |
//! | `PROXY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `PROXY_LOG_LEVEL` | info | Log level |
//! | `PROXY_BACKEND_URL` | http://localhost:8000/baseDstu3 | Backend FHIR server base URL |
//! | `PROXY_FHIR_SOURCE` | default | Source id used to list interactions |
//! | `PROXY_RESOURCE_TABLE` | - | JSON file of supported resource types |
//! | `PROXY_DEBUG` | false | Include parsed backend bodies in error details |
//! | `PROXY_REQUEST_TIMEOUT` | 30 | Backend and request timeout (seconds) |
//! | `PROXY_ROUTE_PREFIX` | /fhir | Path prefix for proxied routes |
//!
//! # Example
//!
//! ```rust
//! use bluebutton_proxy::ProxyConfig;
//!
//! let config = ProxyConfig {
//!     port: 3000,
//!     debug: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "127.0.0.1:3000");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Proxy configuration.
///
/// Built from command line arguments with [`ProxyConfig::parse`], from the
/// environment with [`ProxyConfig::from_env`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "bluebutton-proxy")]
#[command(about = "FHIR proxy in front of a backend FHIR server")]
pub struct ProxyConfig {
    /// Port to listen on.
    #[arg(short, long, env = "PROXY_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "PROXY_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PROXY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Base URL of the backend FHIR server.
    #[arg(
        long,
        env = "PROXY_BACKEND_URL",
        default_value = "http://localhost:8000/baseDstu3"
    )]
    pub backend_url: String,

    /// Source id of the backend, used to list permitted interactions.
    #[arg(long, env = "PROXY_FHIR_SOURCE", default_value = "default")]
    pub fhir_source: String,

    /// JSON file listing supported resource types and their interactions.
    #[arg(long, env = "PROXY_RESOURCE_TABLE")]
    pub resource_table: Option<PathBuf>,

    /// Include parsed backend bodies in relayed error details.
    #[arg(long, env = "PROXY_DEBUG", default_value = "false")]
    pub debug: bool,

    /// Backend and request timeout in seconds.
    #[arg(long, env = "PROXY_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Path prefix for proxied routes.
    #[arg(long, env = "PROXY_ROUTE_PREFIX", default_value = "/fhir")]
    pub route_prefix: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            backend_url: "http://localhost:8000/baseDstu3".to_string(),
            fhir_source: "default".to_string(),
            resource_table: None,
            debug: false,
            request_timeout: 30,
            route_prefix: "/fhir".to_string(),
        }
    }
}

impl ProxyConfig {
    /// Creates a configuration from environment variables only.
    pub fn from_env() -> Self {
        Self::try_parse_from(["bluebutton-proxy"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Err(e) = url::Url::parse(&self.backend_url) {
            errors.push(format!("Invalid backend URL '{}': {}", self.backend_url, e));
        }

        if !self.route_prefix.is_empty() && !self.route_prefix.starts_with('/') {
            errors.push("Route prefix must start with '/'".to_string());
        }

        if self.route_prefix.len() > 1 && self.route_prefix.ends_with('/') {
            errors.push("Route prefix must not end with '/'".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            backend_url: "http://backend.test/fhir".to_string(),
            fhir_source: "test-source".to_string(),
            request_timeout: 5,
            ..Default::default()
        }
    }
}
