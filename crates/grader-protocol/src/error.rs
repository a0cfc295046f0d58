//! Request validation errors.

use thiserror::Error;

/// Reasons a grading request is rejected before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("language must not be empty")]
    EmptyLanguage,

    /// The environment name must be a single plain path segment.
    #[error("invalid environment name '{0}': use letters, digits, '_', '-' or '.'")]
    InvalidEnvName(String),

    #[error("invalid language '{0}': use letters, digits, spaces, '_', '-', '+' or '.'")]
    InvalidLanguage(String),

    #[error("request has neither function nor test code")]
    NoCode,

    #[error("invalid library specifier '{0}'")]
    InvalidLibrary(String),
}
