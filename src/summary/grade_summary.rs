//! Grade summary (grade_summary.json)

use chrono::{DateTime, Utc};
use grader_protocol::{FailureKind, GradeResponse};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

use super::counts::TestCounts;

/// Schema version for grade_summary.json
pub const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for grade_summary.json
pub const SUMMARY_SCHEMA_ID: &str = "code-grader/grade_summary@1";

/// Grade status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// Record of one grading request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSummary {
    pub schema_version: u32,
    pub schema_id: String,

    /// Unique id for this grading
    pub grade_id: String,

    pub created_at: DateTime<Utc>,

    /// Language key (spaces replaced by underscores)
    pub language: String,

    /// Environment name
    pub env: String,

    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,

    /// Exit code of the test process, when it ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Libraries requested for installation
    pub libraries: Vec<String>,

    /// Counts parsed from the unittest output, when the runner finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestCounts>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl GradeSummary {
    /// Start a summary for a request; status is filled in by `finish`.
    pub fn new(language: impl Into<String>, env: impl Into<String>, libraries: Vec<String>) -> Self {
        Self {
            schema_version: SUMMARY_SCHEMA_VERSION,
            schema_id: SUMMARY_SCHEMA_ID.to_string(),
            grade_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            language: language.into(),
            env: env.into(),
            status: Status::Failure,
            failure_kind: None,
            exit_code: None,
            libraries,
            tests: None,
            duration_ms: 0,
        }
    }

    /// Record the response and duration.
    pub fn finish(mut self, response: &GradeResponse, duration_ms: u64) -> Self {
        self.status = if response.is_success() {
            Status::Success
        } else {
            Status::Failure
        };
        self.failure_kind = response.failure_kind();
        self.duration_ms = duration_ms;
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
