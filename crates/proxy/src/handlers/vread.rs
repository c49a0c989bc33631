//! Version read (vread) interaction handler.
//!
//! Proxies the FHIR [vread interaction](https://hl7.org/fhir/http.html#vread):
//! `GET [base]/[type]/[id]/_history/[vid]`

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

/// Handler for the vread interaction.
///
/// # Example
///
/// ```http
/// GET /fhir/Patient/123/_history/2 HTTP/1.1
/// Host: proxy.example.com
/// ```
///
/// is forwarded as `[backend]/Patient/123/_history/2?_format=json`.
pub async fn vread_handler<L, U>(
    State(state): State<AppState<L, U>>,
    Path((resource_type, id, version_id)): Path<(String, String, String)>,
    params: QueryParams,
) -> KickoutResult<Response>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    debug!(
        resource_type = %resource_type,
        id = %id,
        version_id = %version_id,
        "Processing vread request"
    );

    let call = ProxyCall {
        resource_type: &resource_type,
        key: Some(&id),
        interaction: Interaction::Vread,
        call: CallType::from_interaction("vread", Some(&version_id))?,
    };
    forward(&state, call, params).await
}
