//! Code Grader - remote code-execution grader
//!
//! Runs a submitted function against its unittest case inside an isolated
//! interpreter environment and reports pass/fail, with a trimmed error
//! excerpt when the run fails.

pub mod backend;
pub mod config;
pub mod grader;
pub mod harness;
pub mod summary;

pub use backend::{DependencyInstaller, EnvironmentProvisioner, ProcessOutput, ProcessRunner};
pub use config::{EffectiveConfig, GraderConfig};
pub use grader::{GradeError, GradeReport, Grader};
pub use grader_excerpt::{extract_relevant_error, Excerpt, ExcerptConfig, Extractor};
pub use grader_protocol::{FailureKind, GradeResponse, TestRequest};
