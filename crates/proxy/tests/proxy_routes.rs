//! End-to-end proxy tests against a mock backend.
//!
//! Covers:
//! - Backend URL shape for read, vread and history
//! - `_format` normalization on the forwarded query string
//! - Kickouts for unknown resource types, disallowed interactions and
//!   ids that would leave their path segment
//! - Relayed backend error envelopes
//! - Backend transport failures

mod common;

use axum::http::StatusCode;
use bluebutton_proxy::ProxyConfig;
use bluebutton_proxy::upstream::UpstreamResponse;
use common::harness::{BACKEND, ProxyTestHarness};
use common::mock_upstream::MockUpstream;
use serde_json::{Value, json};

// =============================================================================
// Forwarding
// =============================================================================

mod forwarding {
    use super::*;

    #[tokio::test]
    async fn test_read_forwards_with_normalized_format() {
        let harness = ProxyTestHarness::new(MockUpstream::responding(
            UpstreamResponse::new(StatusCode::OK, "<Patient/>")
                .with_content_type("application/fhir+xml"),
        ));

        let response = harness
            .server
            .get("/fhir/Patient/123")
            .add_query_param("_format", "html/xml")
            .add_query_param("count", "5")
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "<Patient/>");
        assert_eq!(response.header("content-type"), "application/fhir+xml");
        assert_eq!(
            harness.only_call(),
            format!("{}/Patient/123/?count=5&_format=xml", BACKEND)
        );
    }

    #[tokio::test]
    async fn test_read_defaults_to_json() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json(r#"{"resourceType":"Patient"}"#));

        let response = harness.server.get("/fhir/Patient/abc").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["resourceType"], "Patient");
        assert_eq!(
            harness.only_call(),
            format!("{}/Patient/abc/?_format=json", BACKEND)
        );
    }

    #[tokio::test]
    async fn test_vread_url() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        harness
            .server
            .get("/fhir/Patient/123/_history/2")
            .await
            .assert_status_ok();

        assert_eq!(
            harness.only_call(),
            format!("{}/Patient/123/_history/2?_format=json", BACKEND)
        );
    }

    #[tokio::test]
    async fn test_instance_history_url() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        harness
            .server
            .get("/fhir/Patient/123/_history")
            .await
            .assert_status_ok();

        assert_eq!(
            harness.only_call(),
            format!("{}/Patient/123/_history?_format=json", BACKEND)
        );
    }

    #[tokio::test]
    async fn test_type_history_url() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        harness
            .server
            .get("/fhir/Patient/_history")
            .add_query_param("FORMAT", "json fhir")
            .await
            .assert_status_ok();

        assert_eq!(
            harness.only_call(),
            format!("{}/Patient/_history?_format=json", BACKEND)
        );
    }

    #[tokio::test]
    async fn test_id_matching_base_path_is_kept() {
        let config = ProxyConfig {
            backend_url: "http://localhost:8000/baseDstu3".to_string(),
            ..ProxyConfig::for_testing()
        };
        let harness = ProxyTestHarness::with_config(MockUpstream::ok_json("{}"), config);

        harness
            .server
            .get("/fhir/Patient/3")
            .await
            .assert_status_ok();

        assert_eq!(
            harness.only_call(),
            "http://localhost:8000/baseDstu3/Patient/3/?_format=json"
        );
    }

    #[tokio::test]
    async fn test_missing_backend_content_type_falls_back_to_requested_format() {
        let harness = ProxyTestHarness::new(MockUpstream::responding(UpstreamResponse::new(
            StatusCode::OK,
            "<Patient/>",
        )));

        let response = harness
            .server
            .get("/fhir/Patient/1")
            .add_query_param("_format", "xml")
            .await;

        assert_eq!(response.header("content-type"), "application/fhir+xml");
    }

    #[tokio::test]
    async fn test_custom_route_prefix() {
        let config = ProxyConfig {
            route_prefix: "/protected/bluebutton/fhir/v1".to_string(),
            ..ProxyConfig::for_testing()
        };
        let harness = ProxyTestHarness::with_config(MockUpstream::ok_json("{}"), config);

        harness
            .server
            .get("/protected/bluebutton/fhir/v1/Patient/1")
            .await
            .assert_status_ok();
        assert_eq!(harness.upstream.calls().len(), 1);
    }
}

// =============================================================================
// Kickouts
// =============================================================================

mod kickouts {
    use super::*;

    #[tokio::test]
    async fn test_unknown_resource_type_is_404() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Foo/1").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.header("content-type"), "application/json");
        assert_eq!(
            response.json::<Value>(),
            json!({
                "resourceType": "OperationOutcome",
                "code": 404,
                "issue": [{
                    "severity": "fatal",
                    "code": "not-found",
                    "details": "Foo is not a supported resource type on this FHIR server."
                }]
            })
        );
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_disallowed_interaction_is_403() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Coverage/1/_history/3").await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body = response.json::<Value>();
        assert_eq!(body["issue"][0]["code"], "security");
        assert_eq!(
            body["issue"][0]["details"],
            "The interaction vread is not permitted on Coverage FHIR resources on this FHIR server."
        );
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_encoded_slashes_in_id_are_rejected() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness
            .server
            .get("/fhir/Patient/..%2F..%2FSecret%2F1")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["issue"][0]["code"], "exception");
        assert_eq!(
            body["issue"][0]["details"],
            "../../Secret/1 is not a valid FHIR id."
        );
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dot_segment_with_encoded_slash_is_rejected() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Patient/..%2F/_history").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_encoded_query_in_id_is_rejected() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Patient/1%3F_format%3Dxml").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_encoded_fragment_in_version_id_is_rejected() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Patient/1/_history/2%23x").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["issue"][0]["details"],
            "2#x is not a valid FHIR id."
        );
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_unreachable_is_502() {
        let harness = ProxyTestHarness::new(MockUpstream::failing("connection refused"));

        let response = harness.server.get("/fhir/Patient/1").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.json::<Value>(),
            json!({"code": 502, "errors": ["connection refused", "Bad Gateway"]})
        );
    }
}

// =============================================================================
// Relayed backend errors
// =============================================================================

mod backend_errors {
    use super::*;

    #[tokio::test]
    async fn test_backend_404_is_relayed_as_envelope() {
        let harness = ProxyTestHarness::new(MockUpstream::responding(UpstreamResponse::new(
            StatusCode::NOT_FOUND,
            "no such patient",
        )));

        let response = harness.server.get("/fhir/Patient/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "errors": ["page not found", "no such patient"],
                "code": 404,
                "status_code": 404,
                "text": "page not found"
            })
        );
    }

    #[tokio::test]
    async fn test_backend_400_passes_through() {
        let harness = ProxyTestHarness::new(MockUpstream::responding(
            UpstreamResponse::new(StatusCode::BAD_REQUEST, r#"{"resourceType":"OperationOutcome"}"#)
                .with_content_type("application/fhir+json"),
        ));

        let response = harness.server.get("/fhir/Patient/1").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/fhir+json");
        assert_eq!(response.json::<Value>()["resourceType"], "OperationOutcome");
    }

    #[tokio::test]
    async fn test_debug_mode_parses_json_detail() {
        let config = ProxyConfig {
            debug: true,
            ..ProxyConfig::for_testing()
        };
        let harness = ProxyTestHarness::with_config(
            MockUpstream::responding(
                UpstreamResponse::new(StatusCode::INTERNAL_SERVER_ERROR, r#"{"issue":[]}"#)
                    .with_content_type("application/json"),
            ),
            config,
        );

        let response = harness.server.get("/fhir/Patient/1").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["errors"][1], json!({"issue": []}));
        assert_eq!(body["text"], "undefined error occurred");
    }

    #[tokio::test]
    async fn test_debug_mode_tags_xml_detail() {
        let config = ProxyConfig {
            debug: true,
            ..ProxyConfig::for_testing()
        };
        let harness = ProxyTestHarness::with_config(
            MockUpstream::responding(UpstreamResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "<html>down</html>",
            )),
            config,
        );

        let response = harness.server.get("/fhir/Patient/1").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = response.json::<Value>();
        assert_eq!(body["errors"][0], "Gateway service unavailable");
        assert_eq!(body["errors"][1], "xml:<html>down</html>");
    }
}

// =============================================================================
// Auxiliary endpoints
// =============================================================================

mod auxiliary {
    use super::*;

    #[tokio::test]
    async fn test_interactions_listing() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Patient/$interactions").await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({
                "resourceType": "Patient",
                "source": "test-source",
                "interaction": ["read", "vread", "search-type", "history-instance", "history-type"]
            })
        );
        assert!(harness.upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_interactions_unknown_type_is_empty() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/fhir/Foo/$interactions").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["interaction"], json!([]));
    }

    #[tokio::test]
    async fn test_health() {
        let harness = ProxyTestHarness::new(MockUpstream::ok_json("{}"));

        let response = harness.server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
    }
}
