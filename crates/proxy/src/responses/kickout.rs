//! Kickouts: early-return error responses.
//!
//! A kickout pairs one of the supported HTTP status codes with a reason and
//! renders the JSON body the proxy has always returned for that code:
//!
//! | Status | Body | Issue code / trailing label |
//! |--------|------|-----------------------------|
//! | 301, 302 | `{code, errors: [reason]}` | - |
//! | 400 | OperationOutcome | exception |
//! | 401, 402, 403 | OperationOutcome | security |
//! | 404 | OperationOutcome | not-found |
//! | 500 | OperationOutcome | exception |
//! | 501 | `{code, errors: [reason, label]}` | Not Implemented |
//! | 502 | `{code, errors: [reason, label]}` | Bad Gateway |
//! | 503 | `{code, errors: [reason, label]}` | Gateway Timeout |
//! | 504 | `{code, errors: [reason, label]}` | Gateway Timeout |
//!
//! 504 carries the same label as 503. Clients match on it, so it stays.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::operation_outcome::{IssueType, OperationOutcome};

/// The status codes a kickout can be raised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickoutStatus {
    /// 301 Moved Permanently.
    MovedPermanently,
    /// 302 Found (temporarily moved).
    Found,
    /// 400 Bad Request.
    BadRequest,
    /// 401 Unauthorized.
    Unauthorized,
    /// 402 Payment Required.
    PaymentRequired,
    /// 403 Forbidden.
    Forbidden,
    /// 404 Not Found.
    NotFound,
    /// 500 Internal Server Error.
    InternalServerError,
    /// 501 Not Implemented.
    NotImplemented,
    /// 502 Bad Gateway.
    BadGateway,
    /// 503 Service Unavailable.
    ServiceUnavailable,
    /// 504 Gateway Timeout.
    GatewayTimeout,
}

impl KickoutStatus {
    /// Every supported status, in ascending code order.
    pub const ALL: [KickoutStatus; 12] = [
        KickoutStatus::MovedPermanently,
        KickoutStatus::Found,
        KickoutStatus::BadRequest,
        KickoutStatus::Unauthorized,
        KickoutStatus::PaymentRequired,
        KickoutStatus::Forbidden,
        KickoutStatus::NotFound,
        KickoutStatus::InternalServerError,
        KickoutStatus::NotImplemented,
        KickoutStatus::BadGateway,
        KickoutStatus::ServiceUnavailable,
        KickoutStatus::GatewayTimeout,
    ];

    /// Returns the numeric HTTP status code.
    pub fn code(&self) -> u16 {
        match self {
            KickoutStatus::MovedPermanently => 301,
            KickoutStatus::Found => 302,
            KickoutStatus::BadRequest => 400,
            KickoutStatus::Unauthorized => 401,
            KickoutStatus::PaymentRequired => 402,
            KickoutStatus::Forbidden => 403,
            KickoutStatus::NotFound => 404,
            KickoutStatus::InternalServerError => 500,
            KickoutStatus::NotImplemented => 501,
            KickoutStatus::BadGateway => 502,
            KickoutStatus::ServiceUnavailable => 503,
            KickoutStatus::GatewayTimeout => 504,
        }
    }

    /// Looks up a status by numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Returns the axum status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KickoutStatus::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            KickoutStatus::Found => StatusCode::FOUND,
            KickoutStatus::BadRequest => StatusCode::BAD_REQUEST,
            KickoutStatus::Unauthorized => StatusCode::UNAUTHORIZED,
            KickoutStatus::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            KickoutStatus::Forbidden => StatusCode::FORBIDDEN,
            KickoutStatus::NotFound => StatusCode::NOT_FOUND,
            KickoutStatus::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            KickoutStatus::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            KickoutStatus::BadGateway => StatusCode::BAD_GATEWAY,
            KickoutStatus::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            KickoutStatus::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// The OperationOutcome issue code, for statuses rendered as outcomes.
    pub fn issue_type(&self) -> Option<IssueType> {
        match self {
            KickoutStatus::BadRequest | KickoutStatus::InternalServerError => {
                Some(IssueType::Exception)
            }
            KickoutStatus::Unauthorized
            | KickoutStatus::PaymentRequired
            | KickoutStatus::Forbidden => Some(IssueType::Security),
            KickoutStatus::NotFound => Some(IssueType::NotFound),
            _ => None,
        }
    }

    /// The fixed label appended after the reason for 5xx gateway statuses.
    pub fn trailing_label(&self) -> Option<&'static str> {
        match self {
            KickoutStatus::NotImplemented => Some("Not Implemented"),
            KickoutStatus::BadGateway => Some("Bad Gateway"),
            KickoutStatus::ServiceUnavailable => Some("Gateway Timeout"),
            KickoutStatus::GatewayTimeout => Some("Gateway Timeout"),
            _ => None,
        }
    }
}

impl fmt::Display for KickoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The `{code, errors}` envelope used for redirects and gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleErrorResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The reason, optionally followed by a fixed label.
    pub errors: Vec<String>,
}

/// A rendered kickout body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KickoutBody {
    /// 4xx/500 OperationOutcome.
    Outcome(OperationOutcome),
    /// Redirect and gateway envelope.
    Simple(SimpleErrorResponse),
}

/// An early-return error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kickout {
    status: KickoutStatus,
    reason: String,
}

impl Kickout {
    /// Creates a kickout for the given status.
    pub fn new(status: KickoutStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    /// Creates a kickout from a numeric code, if the code is supported.
    pub fn from_code(code: u16, reason: impl Into<String>) -> Option<Self> {
        KickoutStatus::from_code(code).map(|status| Self::new(status, reason))
    }

    /// Returns the status.
    pub fn status(&self) -> KickoutStatus {
        self.status
    }

    /// Returns the reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Builds the JSON body.
    pub fn body(&self) -> KickoutBody {
        let code = self.status.code();
        if let Some(issue_type) = self.status.issue_type() {
            return KickoutBody::Outcome(OperationOutcome::fatal(
                code,
                issue_type,
                self.reason.clone(),
            ));
        }

        let mut errors = vec![self.reason.clone()];
        if let Some(label) = self.status.trailing_label() {
            errors.push(label.to_string());
        }
        KickoutBody::Simple(SimpleErrorResponse { code, errors })
    }
}

impl fmt::Display for Kickout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.reason)
    }
}

impl std::error::Error for Kickout {}

impl IntoResponse for Kickout {
    fn into_response(self) -> Response {
        debug!(status = self.status.code(), reason = %self.reason, "Kickout");
        (self.status.status_code(), Json(self.body())).into_response()
    }
}

/// 301 Moved Permanently.
pub fn kickout_301(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::MovedPermanently, reason)
}

/// 302 Temporarily Moved.
pub fn kickout_302(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::Found, reason)
}

/// 400 Bad Request.
pub fn kickout_400(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::BadRequest, reason)
}

/// 401 Unauthorized.
pub fn kickout_401(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::Unauthorized, reason)
}

/// 402 Payment Required.
pub fn kickout_402(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::PaymentRequired, reason)
}

/// 403 Forbidden.
pub fn kickout_403(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::Forbidden, reason)
}

/// 404 Not Found.
pub fn kickout_404(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::NotFound, reason)
}

/// 500 Internal Server Error.
pub fn kickout_500(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::InternalServerError, reason)
}

/// 501 Not Implemented.
pub fn kickout_501(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::NotImplemented, reason)
}

/// 502 Bad Gateway.
pub fn kickout_502(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::BadGateway, reason)
}

/// 503 Service Unavailable.
pub fn kickout_503(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::ServiceUnavailable, reason)
}

/// 504 Gateway Timeout.
pub fn kickout_504(reason: impl Into<String>) -> Kickout {
    Kickout::new(KickoutStatus::GatewayTimeout, reason)
}
