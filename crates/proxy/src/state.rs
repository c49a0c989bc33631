//! Application state for the proxy.
//!
//! Handlers share the supported resource lookup, the backend client and the
//! configuration. All three are read-only once the router is built.

use std::sync::Arc;

use crate::access::ResourceInteractionLookup;
use crate::config::ProxyConfig;
use crate::upstream::UpstreamClient;

/// Shared application state.
///
/// # Type Parameters
///
/// * `L` - The supported resource lookup
/// * `U` - The backend client
///
/// # Example
///
/// ```rust,ignore
/// use bluebutton_proxy::{AppState, ProxyConfig};
/// use bluebutton_proxy::access::StaticResourceTable;
/// use bluebutton_proxy::upstream::HttpUpstream;
/// use std::sync::Arc;
///
/// let config = ProxyConfig::default();
/// let upstream = HttpUpstream::new(config.timeout())?;
/// let state = AppState::new(Arc::new(StaticResourceTable::default()), Arc::new(upstream), config);
/// ```
pub struct AppState<L, U> {
    lookup: Arc<L>,
    upstream: Arc<U>,
    config: Arc<ProxyConfig>,
}

// Manually implement Clone since L and U are wrapped in Arc and don't need to be Clone
impl<L, U> Clone for AppState<L, U> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            upstream: Arc::clone(&self.upstream),
            config: Arc::clone(&self.config),
        }
    }
}

impl<L, U> AppState<L, U>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    /// Creates a new AppState.
    pub fn new(lookup: Arc<L>, upstream: Arc<U>, config: ProxyConfig) -> Self {
        Self {
            lookup,
            upstream,
            config: Arc::new(config),
        }
    }

    /// Returns the supported resource lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns the backend client.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Returns the backend FHIR server base URL.
    pub fn backend_url(&self) -> &str {
        &self.config.backend_url
    }

    /// Returns the source id used to list interactions.
    pub fn fhir_source(&self) -> &str {
        &self.config.fhir_source
    }

    /// Returns whether relayed errors include parsed backend bodies.
    pub fn debug(&self) -> bool {
        self.config.debug
    }
}
