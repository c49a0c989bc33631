//! Backend URL assembly.
//!
//! Backend calls are built as `[base]/[type]/`, then the entity key, then
//! the call-type suffix, then the normalized query string:
//!
//! | Interaction | Backend URL |
//! |------------|-------------|
//! | read | `[base]/[type]/[id]/` |
//! | vread | `[base]/[type]/[id]/_history/[vid]` |
//! | history-instance | `[base]/[type]/[id]/_history` |
//! | history-type | `[base]/[type]/_history` |
//!
//! Ids and version ids must match the FHIR id grammar
//! (`[A-Za-z0-9\-\.]{1,64}`, see [`is_valid_id`]) before they are placed in a
//! backend URL, so they always stay a single path segment.

use url::Url;

use crate::error::{ProxyError, ProxyResult};
use crate::extractors::QueryParams;
use crate::responses::kickout::{Kickout, kickout_400};

/// Longest id the FHIR id grammar allows.
pub const MAX_ID_LEN: usize = 64;

/// True if `id` matches the FHIR id grammar and is not a dot segment.
///
/// `.` and `..` match the grammar but would be collapsed by URL
/// normalization, so they are rejected.
pub fn is_valid_id(id: &str) -> bool {
    (1..=MAX_ID_LEN).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && id != "."
        && id != ".."
}

fn require_valid_id(id: &str) -> ProxyResult<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(ProxyError::InvalidId { id: id.to_string() })
    }
}

/// Appends `key/` to `fhir_url` unless it is already there.
///
/// When the URL already ends with `resource_type/`, a `resource_type/`
/// prefix on the key is dropped so the type is not repeated.
pub fn add_key_to_fhir_url(fhir_url: &str, resource_type: &str, key: &str) -> String {
    let type_segment = format!("{}/", resource_type);
    let key = if fhir_url.ends_with(&type_segment) && key.starts_with(&type_segment) {
        key.replace(&type_segment, "")
    } else {
        key.to_string()
    };

    let key_segment = format!("{}/", key);
    if fhir_url.contains(&key_segment) {
        fhir_url.to_string()
    } else {
        format!("{}{}", fhir_url, key_segment)
    }
}

/// The kind of backend call, selecting the URL suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallType {
    /// Plain read, no suffix.
    Read,
    /// Version read, `_history/[vid]`.
    Vread(String),
    /// History, `_history`.
    History,
}

impl CallType {
    /// Parses an interaction name as used in proxy routes.
    ///
    /// `vread` needs a valid version id; `_history` maps to
    /// [`CallType::History`]; every other name is a plain read.
    pub fn from_interaction(interaction: &str, vid: Option<&str>) -> Result<Self, Kickout> {
        match interaction {
            "vread" => match vid.filter(|v| !v.is_empty()) {
                Some(v) if is_valid_id(v) => Ok(CallType::Vread(v.to_string())),
                Some(v) => Err(kickout_400(format!("{} is not a valid FHIR id.", v))),
                None => Err(kickout_400("A version id is required for vread.")),
            },
            "_history" => Ok(CallType::History),
            _ => Ok(CallType::Read),
        }
    }
}

/// Appends the call-type suffix to `fhir_url`.
pub fn fhir_call_type(call: &CallType, fhir_url: &str) -> String {
    match call {
        CallType::Vread(vid) => format!("{}_history/{}", fhir_url, vid),
        CallType::History => format!("{}_history", fhir_url),
        CallType::Read => fhir_url.to_string(),
    }
}

/// Builds the full backend URL for a proxied call.
///
/// The resource type, key and version id are checked with [`is_valid_id`]
/// and appended as path segments below `base`; an invalid one is a
/// [`ProxyError::InvalidId`].
pub fn backend_url(
    base: &str,
    resource_type: &str,
    key: Option<&str>,
    call: &CallType,
    params: &QueryParams,
) -> ProxyResult<String> {
    require_valid_id(resource_type)?;
    if let Some(key) = key {
        require_valid_id(key)?;
    }
    if let CallType::Vread(vid) = call {
        require_valid_id(vid)?;
    }

    let mut fhir_url = format!("{}/{}/", base.trim_end_matches('/'), resource_type);
    if let Some(key) = key {
        fhir_url.push_str(key);
        fhir_url.push('/');
    }
    let mut pass_to = fhir_call_type(call, &fhir_url);

    if !params.is_empty() {
        pass_to.push('?');
        pass_to.push_str(&params.to_query_string());
    }

    Url::parse(&pass_to).map_err(|source| ProxyError::InvalidUrl {
        url: pass_to.clone(),
        source,
    })?;

    Ok(pass_to)
}
