//! Proxied FHIR route configuration.

use axum::{Router, routing::get};

use crate::access::ResourceInteractionLookup;
use crate::handlers;
use crate::state::AppState;
use crate::upstream::UpstreamClient;

/// Creates all proxy routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
///
/// ## Type-level (under the configured prefix)
/// - `GET /{type}/_history` - Type history
/// - `GET /{type}/$interactions` - Permitted interactions
///
/// ## Instance-level (under the configured prefix)
/// - `GET /{type}/{id}` - Read
/// - `GET /{type}/{id}/_history` - Instance history
/// - `GET /{type}/{id}/_history/{vid}` - Version read
pub fn create_routes<L, U>(state: AppState<L, U>) -> Router
where
    L: ResourceInteractionLookup + 'static,
    U: UpstreamClient + 'static,
{
    let prefix = state.config().route_prefix.clone();

    let fhir = Router::new()
        // Type-level routes
        .route(
            "/{resource_type}/_history",
            get(handlers::history_type_handler::<L, U>),
        )
        .route(
            "/{resource_type}/$interactions",
            get(handlers::interactions_handler::<L, U>),
        )
        // Instance-level routes
        .route("/{resource_type}/{id}", get(handlers::read_handler::<L, U>))
        .route(
            "/{resource_type}/{id}/_history",
            get(handlers::history_instance_handler::<L, U>),
        )
        .route(
            "/{resource_type}/{id}/_history/{version_id}",
            get(handlers::vread_handler::<L, U>),
        )
        // State
        .with_state(state);

    let router = Router::new().route("/health", get(handlers::health_handler));

    if prefix.is_empty() || prefix == "/" {
        router.merge(fhir)
    } else {
        router.nest(&prefix, fhir)
    }
}
