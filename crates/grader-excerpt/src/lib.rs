//! Traceback-to-excerpt extraction for test run transcripts.
//!
//! Given the stderr of a unittest run, the extractor keeps only the lines
//! relevant to the failure: the failure details block when the run ended
//! with a failure summary, or the context around harness stack frames when
//! it died with a raw exception.

mod config;
mod error;
mod indices;
mod result;

pub use config::{
    ExcerptConfig, DEFAULT_ELLIPSIS, DEFAULT_FAILURE_PREFIX, DEFAULT_MARKER_TOKEN,
    DEFAULT_SAMPLE_RADIUS, DEFAULT_SEPARATOR,
};
pub use error::{ExtractError, ExtractResult, IndexSetError};
pub use indices::{coalesce_ranges, find_indices, first_and_last, merge_sorted_sets, LineRange};
pub use result::{Excerpt, Strategy};

/// Extract the relevant error from a transcript using the default configuration.
pub fn extract_relevant_error(full_text: &str) -> ExtractResult<String> {
    Extractor::default().extract(full_text).map(|excerpt| excerpt.render())
}

/// Excerpt extractor bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExcerptConfig,
}

impl Extractor {
    pub fn new(config: ExcerptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExcerptConfig {
        &self.config
    }

    /// Extract an excerpt from a full transcript.
    ///
    /// The strategy is chosen from the last line: a failure summary selects
    /// the separator-delimited block, anything else selects the context
    /// windows around marker lines.
    pub fn extract(&self, full_text: &str) -> ExtractResult<Excerpt> {
        let lines: Vec<&str> = full_text.lines().collect();
        let headline = *lines.last().ok_or(ExtractError::EmptyTranscript)?;

        if headline.starts_with(self.config.failure_prefix.as_str()) {
            self.structured_failure(&lines, headline)
        } else {
            self.raw_exception(&lines, headline)
        }
    }

    fn structured_failure(&self, lines: &[&str], headline: &str) -> ExtractResult<Excerpt> {
        let separators = find_indices(lines, |line| line.starts_with(self.config.separator.as_str()));
        let (first, second) = match separators.as_slice() {
            [first, second, ..] => (*first, *second),
            _ => {
                return Err(ExtractError::MissingSeparators {
                    found: separators.len(),
                })
            }
        };

        let body_lines = &lines[first + 1..second];
        let ranges = if body_lines.is_empty() {
            Vec::new()
        } else {
            vec![LineRange::new(first + 1, second - 1)]
        };

        Ok(Excerpt {
            strategy: Strategy::StructuredFailure,
            body: body_lines.join("\n"),
            headline: headline.to_string(),
            ranges,
        })
    }

    fn raw_exception(&self, lines: &[&str], headline: &str) -> ExtractResult<Excerpt> {
        let radius = self.config.sample_radius;
        let last_index = lines.len() - 1;

        let mut relevant: Vec<usize> = Vec::new();
        for index in find_indices(lines, |line| line.contains(self.config.marker_token.as_str())) {
            let window: Vec<usize> =
                (index.saturating_sub(radius)..=index.saturating_add(radius).min(last_index)).collect();
            relevant = merge_sorted_sets(&window, &relevant)?;
        }

        let ranges = coalesce_ranges(&relevant, Some(0), Some(lines.len()))?;

        let mut body = String::new();
        for range in &ranges {
            if range.start > 0 {
                body.push_str(&self.config.ellipsis);
                body.push('\n');
            }
            body.push_str(&range.slice(lines).join("\n"));
            body.push('\n');
        }

        Ok(Excerpt {
            strategy: Strategy::RawException,
            body,
            headline: headline.to_string(),
            ranges,
        })
    }
}
