//! History interaction handlers.
//!
//! Proxies the FHIR [history interactions](https://hl7.org/fhir/http.html#history):
//! - Instance: `GET [base]/[type]/[id]/_history`
//! - Type: `GET [base]/[type]/_history`

use axum::{
    extract::{Path, State},
    response::Response,
};
use tracing::debug;

use super::forward::{ProxyCall, forward};
use crate::access::{Interaction, ResourceInteractionLookup};
use crate::error::KickoutResult;
use crate::extractors::QueryParams;
use crate::state::AppState;
use crate::upstream::UpstreamClient;
use crate::urls::CallType;

/// Handler for instance-level history.
pub async fn history_instance_handler<L, U>(
    State(state): State<AppState<L, U>>,
    Path((resource_type, id)): Path<(String, String)>,
    params: QueryParams,
) -> KickoutResult<Response>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    debug!(resource_type = %resource_type, id = %id, "Processing instance history request");

    let call = ProxyCall {
        resource_type: &resource_type,
        key: Some(&id),
        interaction: Interaction::HistoryInstance,
        call: CallType::History,
    };
    forward(&state, call, params).await
}

/// Handler for type-level history.
pub async fn history_type_handler<L, U>(
    State(state): State<AppState<L, U>>,
    Path(resource_type): Path<String>,
    params: QueryParams,
) -> KickoutResult<Response>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    debug!(resource_type = %resource_type, "Processing type history request");

    let call = ProxyCall {
        resource_type: &resource_type,
        key: None,
        interaction: Interaction::HistoryType,
        call: CallType::History,
    };
    forward(&state, call, params).await
}
