//! Grading response types.

use serde::{Deserialize, Serialize};

/// Why a grading request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The request was rejected before running anything
    InvalidRequest,
    /// Installing the requested libraries failed
    InstallFailed,
    /// The test ran and did not pass
    TestFailed,
    /// The test did not pass and its output could not be trimmed
    UnparsedOutput,
}

impl FailureKind {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            FailureKind::InvalidRequest => "Invalid request",
            FailureKind::InstallFailed => "Library installation failed",
            FailureKind::TestFailed => "Test failed",
            FailureKind::UnparsedOutput => "Test failed with unrecognized output",
        }
    }
}

/// Outcome returned to the caller.
///
/// Serializes as `{"outcome": "success"}` or
/// `{"outcome": "failure", "error": "...", "kind": "TEST_FAILED"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum GradeResponse {
    Success,
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<FailureKind>,
    },
}

impl GradeResponse {
    /// Create a failure response.
    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        GradeResponse::Failure {
            error: error.into(),
            kind: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GradeResponse::Success)
    }

    /// Failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            GradeResponse::Success => None,
            GradeResponse::Failure { kind, .. } => *kind,
        }
    }

    /// Error text, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            GradeResponse::Success => None,
            GradeResponse::Failure { error, .. } => Some(error),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
