//! Grading summaries
//!
//! A summary records what happened to one grading request, including the
//! test counts unittest reported.

mod counts;
mod grade_summary;

pub use counts::{parse_unittest_counts, FailingTest, TestCounts, MAX_FAILING_TESTS};
pub use grade_summary::{GradeSummary, Status, SUMMARY_SCHEMA_ID, SUMMARY_SCHEMA_VERSION};
