//! Test counts parsed from unittest output
//!
//! Reads the `Ran N tests in Xs` line, the final `OK`/`FAILED (...)` line and
//! the `FAIL:`/`ERROR:` headers of the failure details.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of failing tests kept in a summary
pub const MAX_FAILING_TESTS: usize = 20;

/// A failing or erroring test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailingTest {
    /// "FAIL" for assertion failures, "ERROR" for exceptions
    pub kind: String,
    /// Test method name
    pub method: String,
    /// Qualified test case, e.g. "__main__.TestProcess"
    pub case: String,
}

/// Counts reported by a unittest run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCounts {
    pub ran: u32,
    pub failures: u32,
    pub errors: u32,
    pub skipped: u32,
    pub expected_failures: u32,
    pub unexpected_successes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Whether the final status line was OK
    pub ok: bool,
    pub failing_tests: Vec<FailingTest>,
}

impl TestCounts {
    /// Tests that neither failed, errored nor were skipped
    pub fn passed(&self) -> u32 {
        self.ran
            .saturating_sub(self.failures)
            .saturating_sub(self.errors)
            .saturating_sub(self.skipped)
    }
}

fn ran_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Ran (\d+) tests? in (\d+(?:\.\d+)?)s$").expect("ran pattern"))
}

fn status_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(OK|FAILED)(?: \((.*)\))?$").expect("status pattern"))
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(FAIL|ERROR): (\w+) \(([\w.]+)\)").expect("header pattern"))
}

/// Parse unittest counts from stderr.
///
/// Returns None when the output has no `Ran N tests` line, i.e. the runner
/// never finished.
pub fn parse_unittest_counts(stderr: &str) -> Option<TestCounts> {
    let mut counts = TestCounts::default();
    let mut saw_ran = false;

    for line in stderr.lines() {
        let line = line.trim_end();

        if let Some(caps) = header_re().captures(line) {
            if counts.failing_tests.len() < MAX_FAILING_TESTS {
                counts.failing_tests.push(FailingTest {
                    kind: caps[1].to_string(),
                    method: caps[2].to_string(),
                    case: caps[3].to_string(),
                });
            }
        } else if let Some(caps) = ran_re().captures(line) {
            saw_ran = true;
            counts.ran = caps[1].parse().unwrap_or(0);
            counts.duration_seconds = caps[2].parse().ok();
        } else if let Some(caps) = status_re().captures(line) {
            counts.ok = &caps[1] == "OK";
            if let Some(details) = caps.get(2) {
                apply_status_details(&mut counts, details.as_str());
            }
        }
    }

    saw_ran.then_some(counts)
}

/// Apply `failures=1, errors=2, skipped=1` style details
fn apply_status_details(counts: &mut TestCounts, details: &str) {
    for part in details.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        let value: u32 = value.trim().parse().unwrap_or(0);
        match key.trim() {
            "failures" => counts.failures = value,
            "errors" => counts.errors = value,
            "skipped" => counts.skipped = value,
            "expected failures" => counts.expected_failures = value,
            "unexpected successes" => counts.unexpected_successes = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED_RUN: &str = "\
F.E
======================================================================
ERROR: test_div (__main__.TestProcess.test_div)
----------------------------------------------------------------------
Traceback (most recent call last):
ZeroDivisionError: division by zero

======================================================================
FAIL: test_add (__main__.TestProcess)
----------------------------------------------------------------------
Traceback (most recent call last):
AssertionError: 3 != 4

----------------------------------------------------------------------
Ran 3 tests in 0.002s

FAILED (failures=1, errors=1)
";

    #[test]
    fn test_parse_failed_run() {
        let counts = parse_unittest_counts(FAILED_RUN).unwrap();
        assert_eq!(counts.ran, 3);
        assert_eq!(counts.failures, 1);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.passed(), 1);
        assert!(!counts.ok);
        assert_eq!(counts.duration_seconds, Some(0.002));

        assert_eq!(counts.failing_tests.len(), 2);
        assert_eq!(counts.failing_tests[0].kind, "ERROR");
        assert_eq!(counts.failing_tests[0].method, "test_div");
        assert_eq!(counts.failing_tests[0].case, "__main__.TestProcess.test_div");
        assert_eq!(counts.failing_tests[1].case, "__main__.TestProcess");
    }

    #[test]
    fn test_parse_ok_with_skips() {
        let stderr = "..s\n----------------------------------------------------------------------\nRan 3 tests in 0.000s\n\nOK (skipped=1)\n";
        let counts = parse_unittest_counts(stderr).unwrap();
        assert!(counts.ok);
        assert_eq!(counts.ran, 3);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.passed(), 2);
    }

    #[test]
    fn test_parse_single_test() {
        let counts = parse_unittest_counts("Ran 1 test in 1s\n\nOK\n").unwrap();
        assert_eq!(counts.ran, 1);
        assert!(counts.ok);
    }

    #[test]
    fn test_no_runner_output() {
        let stderr = "Traceback (most recent call last):\nNameError: name 'unittest' is not defined\n";
        assert!(parse_unittest_counts(stderr).is_none());
    }
}
