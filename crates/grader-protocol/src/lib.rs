//! Code grader protocol types
//!
//! Defines the JSON request a caller submits for grading and the response
//! the grader returns.

pub mod error;
pub mod request;
pub mod response;

pub use error::RequestError;
pub use request::TestRequest;
pub use response::{FailureKind, GradeResponse};

/// Current grader version string.
pub const GRADER_VERSION: &str = "0.1.0";
