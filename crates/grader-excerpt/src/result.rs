//! Excerpt result types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indices::LineRange;

/// Which extraction strategy produced an excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// The run ended with a unittest failure summary; the body is the
    /// block between the first two separator lines.
    StructuredFailure,
    /// Anything else; the body is the context around harness frames.
    RawException,
}

/// A trimmed error excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Strategy selected from the last transcript line.
    pub strategy: Strategy,

    /// Selected lines, possibly empty.
    pub body: String,

    /// The transcript's last line.
    pub headline: String,

    /// Line ranges that make up the body (inclusive, transcript indices).
    pub ranges: Vec<LineRange>,
}

impl Excerpt {
    /// The excerpt as a single string: body, newline, headline.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.body, self.headline)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.body, self.headline)
    }
}
