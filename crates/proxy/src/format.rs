//! `_format` negotiation for backend calls.
//!
//! Clients ask for a representation with `_format` or `format`, in any case
//! and with values such as `html/xml`, `application/json+fhir` or
//! `xml fhir`. The backend only understands `_format=json` and
//! `_format=xml`, so [`normalize_format`] rewrites the parameters before the
//! call is made.

use std::fmt;

use tracing::debug;

use crate::extractors::{ParamValue, QueryParams};

/// The canonical format parameter name.
pub const FORMAT_PARAM: &str = "_format";

/// The legacy format parameter name.
pub const LEGACY_FORMAT_PARAM: &str = "format";

/// Values that select XML.
pub const XML_MARKERS: [&str; 4] = ["html/xml", "xml", "xml+fhir", "xml fhir"];

/// Values that select JSON.
pub const JSON_MARKERS: [&str; 4] = ["html/json", "json", "json+fhir", "json fhir"];

/// A backend representation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FhirFormat {
    /// JSON.
    #[default]
    Json,
    /// XML.
    Xml,
}

impl FhirFormat {
    /// Returns the `_format` value sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            FhirFormat::Json => "json",
            FhirFormat::Xml => "xml",
        }
    }

    /// Returns the MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            FhirFormat::Json => "application/fhir+json",
            FhirFormat::Xml => "application/fhir+xml",
        }
    }
}

impl fmt::Display for FhirFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if any parameter named `key` (ignoring case) has a value containing
/// one of `markers` (ignoring case).
fn has_marker(params: &QueryParams, key: &str, markers: &[&str]) -> bool {
    params
        .get_ignore_case(key)
        .any(|value| markers.iter().any(|m| value.contains_ignore_case(m)))
}

/// Resolves the format a client asked for.
///
/// Precedence: XML in `_format`, XML in `format`, JSON in `_format`, JSON in
/// `format`, then JSON by default.
pub fn resolve_format(params: &QueryParams) -> FhirFormat {
    if has_marker(params, FORMAT_PARAM, &XML_MARKERS)
        || has_marker(params, LEGACY_FORMAT_PARAM, &XML_MARKERS)
    {
        FhirFormat::Xml
    } else {
        // JSON markers and the fallback both land on JSON.
        FhirFormat::Json
    }
}

/// Rewrites query parameters for the backend.
///
/// Every `format`/`_format` variant is dropped and a single `_format` holding
/// `json` or `xml` is appended after the remaining parameters, which keep
/// their order.
pub fn normalize_format(params: &QueryParams) -> QueryParams {
    debug!(params = ?params, "Evaluating _format");

    let format = resolve_format(params);
    let mut updated = params.without_ignore_case(&[FORMAT_PARAM, LEGACY_FORMAT_PARAM]);
    updated.insert_last(FORMAT_PARAM, ParamValue::from(format.as_str()));

    debug!(updated = ?updated, "Updated parameters");
    updated
}

/// The format a client asked for, read from the raw parameters.
///
/// Looser than [`resolve_format`]: only a case-sensitive `xml` in the exact
/// `_format` or `format` keys selects XML.
pub fn request_format(params: &QueryParams) -> FhirFormat {
    let wants_xml = [FORMAT_PARAM, LEGACY_FORMAT_PARAM]
        .iter()
        .filter_map(|key| params.get(key))
        .any(|value| value.contains("xml"));

    if wants_xml {
        FhirFormat::Xml
    } else {
        FhirFormat::Json
    }
}
