//! Response formatting for the proxy.
//!
//! - [`kickout`] - Early-return error responses per status code
//! - [`operation_outcome`] - OperationOutcome bodies
//! - [`error_status`] - Envelopes relaying backend error responses

pub mod error_status;
pub mod kickout;
pub mod operation_outcome;

pub use error_status::{ContentTypeCheck, ErrorStatus, error_status, get_content_type};
pub use kickout::{Kickout, KickoutBody, KickoutStatus, SimpleErrorResponse};
pub use operation_outcome::{Issue, IssueSeverity, IssueType, OperationOutcome};
