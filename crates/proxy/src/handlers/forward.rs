//! The proxy pipeline shared by every handler.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::access::{Interaction, ResourceInteractionLookup, check_access};
use crate::error::KickoutResult;
use crate::extractors::QueryParams;
use crate::format::{normalize_format, request_format};
use crate::responses::error_status::{ContentTypeCheck, get_content_type};
use crate::state::AppState;
use crate::upstream::UpstreamClient;
use crate::urls::{CallType, backend_url};

/// A proxied call, as parsed from the incoming route.
#[derive(Debug)]
pub struct ProxyCall<'a> {
    /// The FHIR resource type.
    pub resource_type: &'a str,
    /// The entity key, absent for type-level calls.
    pub key: Option<&'a str>,
    /// The interaction checked against the resource table.
    pub interaction: Interaction,
    /// The backend URL suffix.
    pub call: CallType,
}

/// Runs a call through normalization, access check, backend GET and
/// response relaying.
pub async fn forward<L, U>(
    state: &AppState<L, U>,
    call: ProxyCall<'_>,
    params: QueryParams,
) -> KickoutResult<Response>
where
    L: ResourceInteractionLookup,
    U: UpstreamClient,
{
    let normalized = normalize_format(&params);

    check_access(state.lookup(), call.resource_type, call.interaction)?;

    let url = backend_url(
        state.backend_url(),
        call.resource_type,
        call.key,
        &call.call,
        &normalized,
    )?;

    debug!(
        resource_type = %call.resource_type,
        interaction = %call.interaction,
        url = %url,
        "Forwarding to backend"
    );

    let upstream = state.upstream().get(&url).await?;

    match get_content_type(&upstream, state.debug()) {
        ContentTypeCheck::Error(envelope) => Ok(envelope.into_response()),
        ContentTypeCheck::ContentType(content_type) => {
            let content_type = content_type
                .and_then(|ct| HeaderValue::from_str(&ct).ok())
                .unwrap_or_else(|| HeaderValue::from_static(request_format(&params).mime_type()));

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, content_type);

            Ok((
                upstream.status(),
                headers,
                Body::from(upstream.text().to_string()),
            )
                .into_response())
        }
    }
}
