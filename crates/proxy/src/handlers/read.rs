//! Read interaction handler.
//!
//! Proxies the FHIR [read interaction](https://hl7.org/fhir/http.html#read):
//! `GET [base]/[type]/[id]`

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

/// Handler for the read interaction.
///
/// # Response
///
/// - The backend status, Content-Type and body on success
/// - `400 Bad Request` - The id is not a valid FHIR id
/// - `404 Not Found` - Resource type is not served by this proxy
/// - `403 Forbidden` - Resource type does not allow read
/// - Relayed error envelope when the backend answers with an error status
pub async fn read_handler<L, U>(
    State(state): State<AppState<L, U>>,
    Path((resource_type, id)): Path<(String, String)>,
    params: QueryParams,
) -> KickoutResult<Response>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    debug!(resource_type = %resource_type, id = %id, "Processing read request");

    let call = ProxyCall {
        resource_type: &resource_type,
        key: Some(&id),
        interaction: Interaction::Read,
        call: CallType::Read,
    };
    forward(&state, call, params).await
}
