//! OperationOutcome bodies for 4xx/5xx kickouts.
//!
//! The proxy reports a single fatal issue per response. Field order on the
//! wire is `resourceType`, `code`, `issue`, and each issue is
//! `severity`, `code`, `details`.

use serde::{Deserialize, Serialize};

/// Issue severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Fatal error - processing cannot continue.
    Fatal,
    /// Error - processing has failed.
    Error,
    /// Warning - processing succeeded but with concerns.
    Warning,
    /// Information - informational message.
    Information,
}

impl IssueSeverity {
    /// Returns the FHIR string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Fatal => "fatal",
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Information => "information",
        }
    }
}

/// Issue type codes used by proxy kickouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    /// Unexpected failure, also used for malformed requests.
    Exception,
    /// Authentication, authorization or payment problem.
    Security,
    /// Resource or resource type not found.
    NotFound,
}

impl IssueType {
    /// Returns the FHIR code string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Exception => "exception",
            IssueType::Security => "security",
            IssueType::NotFound => "not-found",
        }
    }
}

/// An issue in an OperationOutcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The severity of the issue.
    pub severity: IssueSeverity,
    /// The type/code of the issue.
    pub code: IssueType,
    /// Human-readable description.
    pub details: String,
}

impl Issue {
    /// Creates a new issue.
    pub fn new(severity: IssueSeverity, code: IssueType, details: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            details: details.into(),
        }
    }

    /// Creates a fatal issue.
    pub fn fatal(code: IssueType, details: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Fatal, code, details)
    }
}

/// A FHIR OperationOutcome carrying the HTTP status it was raised with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// Always `OperationOutcome`.
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    /// The HTTP status code mirrored into the body.
    pub code: u16,
    /// The issues, in the order they were added.
    pub issue: Vec<Issue>,
}

impl OperationOutcome {
    /// Creates an outcome with no issues.
    pub fn new(code: u16) -> Self {
        Self {
            resource_type: "OperationOutcome".to_string(),
            code,
            issue: Vec::new(),
        }
    }

    /// Creates an outcome with exactly one fatal issue.
    pub fn fatal(code: u16, issue_type: IssueType, details: impl Into<String>) -> Self {
        Self::new(code).with_issue(Issue::fatal(issue_type, details))
    }

    /// Adds an issue.
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issue.push(issue);
        self
    }

    /// Returns true if there are any error or fatal issues.
    pub fn has_errors(&self) -> bool {
        self.issue
            .iter()
            .any(|i| matches!(i.severity, IssueSeverity::Error | IssueSeverity::Fatal))
    }
}
