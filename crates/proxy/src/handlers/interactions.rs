//! Lists the interactions a resource type allows.
//!
//! `GET [base]/[type]/$interactions`

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::access::{ResourceInteractionLookup, valid_interactions};
use crate::state::AppState;
use crate::upstream::UpstreamClient;

/// Handler returning `{resourceType, source, interaction: [...]}`.
///
/// An unknown resource type yields an empty list rather than an error.
pub async fn interactions_handler<L, U>(
    State(state): State<AppState<L, U>>,
    Path(resource_type): Path<String>,
) -> Json<Value>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    let interactions = valid_interactions(state.lookup(), &resource_type, state.fhir_source());

    Json(json!({
        "resourceType": resource_type,
        "source": state.fhir_source(),
        "interaction": interactions,
    }))
}
