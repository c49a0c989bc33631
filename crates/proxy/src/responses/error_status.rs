//! Error envelopes built from backend responses.
//!
//! When the backend FHIR server answers with an error status the proxy
//! relays it as `{errors: [reason, detail], code, status_code, text}`, where
//! `detail` is lifted from the backend body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::upstream::UpstreamResponse;

/// Reason that asks [`error_status`] to pick a status-specific message.
pub const UNDEFINED_ERROR: &str = "undefined error occurred";

/// Backend statuses that are relayed as error envelopes.
///
/// 400 is deliberately absent: backend validation failures pass through.
pub const ERROR_CODE_LIST: [u16; 11] = [301, 302, 401, 402, 403, 404, 500, 501, 502, 503, 504];

/// The envelope returned by [`error_status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorStatus {
    /// `[reason, error_detail]`.
    pub errors: Vec<Value>,
    /// The HTTP status code.
    pub code: u16,
    /// The HTTP status code, repeated.
    pub status_code: u16,
    /// The reason.
    pub text: String,
}

impl ErrorStatus {
    /// Returns the reason string.
    pub fn reason(&self) -> &str {
        &self.text
    }

    /// Returns the detail extracted from the backend body, if present.
    pub fn detail(&self) -> Option<&Value> {
        self.errors.get(1)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// The message used in place of [`UNDEFINED_ERROR`] for a status code.
pub fn default_reason(status_code: u16) -> Option<&'static str> {
    let reason = match status_code {
        404 => "page not found",
        403 => "You are not authorised to access this page. Do you need to login?",
        402 => "There is a Payment problem",
        401 => "Unauthenticated - There was a problem with login",
        400 => "There was a problem with the data",
        301 => "The requested page has been permanently moved",
        302 => "The requested page has been temporarily moved",
        501 => "Not Implemented",
        502 => "Bad gateway",
        503 => "Gateway service unavailable",
        504 => "The gateway has timed out",
        _ => return None,
    };
    Some(reason)
}

/// Pulls the error detail out of a backend body.
///
/// Outside debug mode the raw body is returned. In debug mode an XML body is
/// tagged with `xml:` and a JSON body is parsed; an empty body or JSON that
/// fails to parse gives an empty detail.
pub fn extract_error_detail(response: &UpstreamResponse, debug_mode: bool) -> Value {
    let text = response.text();
    if !debug_mode {
        return Value::String(text.to_string());
    }

    if text.is_empty() {
        return Value::String(String::new());
    }

    if text.starts_with('<') {
        Value::String(format!("xml:{}", text))
    } else if response.is_json() {
        serde_json::from_str(text).unwrap_or_else(|e| {
            debug!(error = %e, "Backend body is not valid JSON");
            Value::String(String::new())
        })
    } else {
        Value::String(text.to_string())
    }
}

/// Builds the error envelope for a backend response.
pub fn error_status(
    response: &UpstreamResponse,
    status_code: u16,
    reason: &str,
    debug_mode: bool,
) -> ErrorStatus {
    debug!(
        upstream_status = response.status().as_u16(),
        status_code, "Building error status"
    );

    let error_detail = extract_error_detail(response, debug_mode);

    let reason = if reason == UNDEFINED_ERROR {
        default_reason(status_code).unwrap_or(reason)
    } else {
        reason
    };
    debug!(reason = %reason, "Error status reason");

    let envelope = ErrorStatus {
        errors: vec![Value::String(reason.to_string()), error_detail],
        code: status_code,
        status_code,
        text: reason.to_string(),
    };

    debug!(errors = ?envelope.errors, "Errors");
    envelope
}

/// Outcome of [`get_content_type`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentTypeCheck {
    /// The backend answered normally; carries its Content-Type, if any.
    ContentType(Option<String>),
    /// The backend answered with a relayed error status.
    Error(ErrorStatus),
}

/// Checks a backend response for its Content-Type.
///
/// Expected values look like `application/json+fhir;charset=UTF-8` or
/// `application/xml+fhir;charset=UTF-8`. Error statuses from
/// [`ERROR_CODE_LIST`] short-circuit into an [`ErrorStatus`].
pub fn get_content_type(response: &UpstreamResponse, debug_mode: bool) -> ContentTypeCheck {
    let status = response.status().as_u16();
    if ERROR_CODE_LIST.contains(&status) {
        return ContentTypeCheck::Error(error_status(response, status, UNDEFINED_ERROR, debug_mode));
    }

    ContentTypeCheck::ContentType(response.content_type().map(String::from))
}
