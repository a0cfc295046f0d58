//! Extractor configuration types.

use serde::{Deserialize, Serialize};

/// Class name of the generated unittest case; frames mentioning it belong to the harness.
pub const DEFAULT_MARKER_TOKEN: &str = "TestProcess";

/// Lines of context kept on each side of a marker line.
pub const DEFAULT_SAMPLE_RADIUS: usize = 5;

/// Prefix of the unittest summary line for a failed run.
pub const DEFAULT_FAILURE_PREFIX: &str = "FAILED";

/// Prefix of the dashed separator lines unittest prints around failure details.
pub const DEFAULT_SEPARATOR: &str = "---------------------------------";

/// Line inserted where lines were skipped.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Configuration for the excerpt extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Token identifying stack frames of the test harness.
    pub marker_token: String,

    /// Context window radius around each marker line.
    pub sample_radius: usize,

    /// Last-line prefix that selects the structured failure strategy.
    pub failure_prefix: String,

    /// Prefix identifying separator lines in a structured failure.
    pub separator: String,

    /// Marker line emitted between non-adjacent ranges.
    pub ellipsis: String,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            marker_token: DEFAULT_MARKER_TOKEN.to_string(),
            sample_radius: DEFAULT_SAMPLE_RADIUS,
            failure_prefix: DEFAULT_FAILURE_PREFIX.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}
