//! Grading request types.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// A function plus its test, to be executed in a named environment.
///
/// Source fields are line lists; they are joined with newlines when the
/// program is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRequest {
    /// Target language, e.g. "python" (spaces are allowed).
    pub language: String,
    /// Lines of the function under test.
    pub function: Vec<String>,
    /// Lines of the unittest case exercising the function.
    pub test: Vec<String>,
    /// Import lines placed before the function.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Packages to install into the environment before running.
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Environment name; environments are reused across requests.
    pub env: String,
}

impl TestRequest {
    /// Check the request before any environment work happens.
    pub fn validate(&self) -> Result<(), RequestError> {
        let language = self.language.trim();
        if language.is_empty() {
            return Err(RequestError::EmptyLanguage);
        }
        if !language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-' | '+' | '.'))
            || language.starts_with('.')
        {
            return Err(RequestError::InvalidLanguage(self.language.clone()));
        }

        if !is_plain_segment(&self.env) {
            return Err(RequestError::InvalidEnvName(self.env.clone()));
        }

        if self.function.is_empty() && self.test.is_empty() {
            return Err(RequestError::NoCode);
        }

        // A leading dash would be read as an installer option
        if let Some(lib) = self
            .libraries
            .iter()
            .find(|l| l.trim().is_empty() || l.trim_start().starts_with('-'))
        {
            return Err(RequestError::InvalidLibrary(lib.clone()));
        }

        Ok(())
    }

    /// Language as used in environment paths: trimmed, spaces replaced by underscores.
    pub fn language_key(&self) -> String {
        self.language.trim().replace(' ', "_")
    }
}

fn is_plain_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
