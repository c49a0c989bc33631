//! Proxy test harness.

use axum_test::TestServer;
use bluebutton_proxy::access::{StaticResourceTable, SupportedResourceType};
use bluebutton_proxy::{ProxyConfig, create_app};

use super::mock_upstream::MockUpstream;

/// Backend base URL used by [`ProxyConfig::for_testing`].
pub const BACKEND: &str = "http://backend.test/fhir";

/// The resource table used by most tests.
///
/// - `Patient` allows read, vread, search and history
/// - `Coverage` allows read only
pub fn resource_table() -> StaticResourceTable {
    StaticResourceTable::new(vec![
        SupportedResourceType::read_only("Patient", "test-source"),
        SupportedResourceType {
            read: true,
            ..SupportedResourceType::new("Coverage", "test-source")
        },
    ])
}

/// A test server plus a handle on the mock backend.
pub struct ProxyTestHarness {
    /// The test server instance.
    pub server: TestServer,
    /// The mock backend, sharing its call log with the server.
    pub upstream: MockUpstream,
}

impl ProxyTestHarness {
    /// Creates a harness with the default test configuration.
    pub fn new(upstream: MockUpstream) -> Self {
        Self::with_config(upstream, ProxyConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(upstream: MockUpstream, config: ProxyConfig) -> Self {
        let app = create_app(resource_table(), upstream.clone(), config);
        let server = TestServer::new(app).expect("Failed to create test server");
        Self { server, upstream }
    }

    /// The single backend URL requested so far.
    pub fn only_call(&self) -> String {
        let calls = self.upstream.calls();
        assert_eq!(calls.len(), 1, "expected one backend call, got {:?}", calls);
        calls[0].clone()
    }
}
