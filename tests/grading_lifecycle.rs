//! Grading pipeline tests against the in-memory backend

mod fixtures;

use code_grader::backend::mock::MockBackend;
use code_grader::grader::GradeError;
use code_grader::summary::Status;
use code_grader::{ExcerptConfig, FailureKind, GradeResponse, Grader, TestRequest};

fn request() -> TestRequest {
    TestRequest {
        language: "python".to_string(),
        function: vec!["def add(a, b):".to_string(), "    return a + b".to_string()],
        test: vec![
            "class TestProcess(unittest.TestCase):".to_string(),
            "    def test_add(self):".to_string(),
            "        self.assertEqual(add(1, 2), 3)".to_string(),
        ],
        imports: vec!["import unittest".to_string()],
        libraries: vec![],
        env: "e1".to_string(),
    }
}

fn grader(backend: &MockBackend) -> Grader<&MockBackend, &MockBackend, &MockBackend> {
    Grader::new(backend, backend, backend, ExcerptConfig::default())
}

#[test]
fn test_passing_run() {
    let backend = MockBackend::new().with_output(0, fixtures::transcript("passing_run.txt"));
    let report = grader(&backend).grade(&request()).unwrap();

    assert_eq!(report.response, GradeResponse::Success);
    assert_eq!(report.summary.status, Status::Success);
    assert_eq!(report.summary.exit_code, Some(0));

    let tests = report.summary.tests.expect("unittest counts");
    assert_eq!(tests.ran, 3);
    assert!(tests.ok);

    let calls = backend.calls();
    assert_eq!(calls.ensured.len(), 1);
    assert_eq!(calls.ensured[0].language, "python");
    assert_eq!(calls.ensured[0].env, "e1");
    assert!(calls.installed.is_empty(), "no libraries requested");
    assert_eq!(calls.programs.len(), 1);
    assert!(calls.programs[0].contains("loadTestsFromTestCase(TestProcess)"));
    assert!(calls.programs[0].contains("def add(a, b):"));
}

#[test]
fn test_failing_run_returns_excerpt() {
    let backend = MockBackend::new().with_output(0, fixtures::transcript("assertion_failure.txt"));
    let report = grader(&backend).grade(&request()).unwrap();

    assert_eq!(report.response.failure_kind(), Some(FailureKind::TestFailed));
    let error = report.response.error().unwrap();
    assert!(error.starts_with("Traceback (most recent call last):"));
    assert!(error.ends_with("FAILED (failures=1)"));
    assert!(!error.contains("Ran 2 tests"));

    let tests = report.summary.tests.expect("unittest counts");
    assert_eq!(tests.failures, 1);
    assert_eq!(tests.failing_tests[0].method, "test_add_negative");
}

#[test]
fn test_crash_before_runner() {
    let backend = MockBackend::new().with_output(1, fixtures::transcript("deep_exception.txt"));
    let report = grader(&backend).grade(&request()).unwrap();

    assert_eq!(report.response.failure_kind(), Some(FailureKind::TestFailed));
    let error = report.response.error().unwrap();
    assert!(error.starts_with("...\n"));
    assert!(error.contains("loadTestsFromTestCase(TestProcess)"));
    assert!(error.ends_with("RuntimeError: qualname hook failed"));
    assert!(report.summary.tests.is_none());
    assert_eq!(report.summary.exit_code, Some(1));
}

#[test]
fn test_malformed_output_becomes_generic_failure() {
    let backend = MockBackend::new().with_output(0, fixtures::transcript("truncated_failure.txt"));
    let report = grader(&backend).grade(&request()).unwrap();

    assert_eq!(report.response.failure_kind(), Some(FailureKind::UnparsedOutput));
    assert!(report.response.error().unwrap().contains("separator"));
}

#[test]
fn test_empty_stderr_with_nonzero_exit() {
    let backend = MockBackend::new().with_output(137, "");
    let report = grader(&backend).grade(&request()).unwrap();

    assert_eq!(report.response.failure_kind(), Some(FailureKind::UnparsedOutput));
    assert!(report.response.error().unwrap().contains("empty"));
}

#[test]
fn test_libraries_installed_before_run() {
    let backend = MockBackend::new().with_output(0, "");
    let req = TestRequest {
        libraries: vec!["numpy".to_string(), "pandas==2.2.0".to_string()],
        ..request()
    };
    let report = grader(&backend).grade(&req).unwrap();

    assert!(report.response.is_success());
    let calls = backend.calls();
    assert_eq!(calls.installed, vec![vec!["numpy".to_string(), "pandas==2.2.0".to_string()]]);
    assert_eq!(calls.programs.len(), 1);
    assert_eq!(report.summary.libraries.len(), 2);
}

#[test]
fn test_install_failure_stops_before_run() {
    let backend = MockBackend::new()
        .with_install_failure("ERROR: No matching distribution found for nonexistent-pkg");
    let req = TestRequest {
        libraries: vec!["nonexistent-pkg".to_string()],
        ..request()
    };
    let report = grader(&backend).grade(&req).unwrap();

    assert_eq!(
        report.response,
        GradeResponse::failure(
            FailureKind::InstallFailed,
            "ERROR: No matching distribution found for nonexistent-pkg"
        )
    );
    assert!(backend.calls().programs.is_empty());
    assert_eq!(report.summary.status, Status::Failure);
}

#[test]
fn test_invalid_request_touches_nothing() {
    let backend = MockBackend::new();
    let req = TestRequest {
        env: "../../etc".to_string(),
        ..request()
    };
    let report = grader(&backend).grade(&req).unwrap();

    assert_eq!(report.response.failure_kind(), Some(FailureKind::InvalidRequest));
    let calls = backend.calls();
    assert!(calls.ensured.is_empty());
    assert!(calls.programs.is_empty());
}

#[test]
fn test_language_with_spaces_maps_to_env_key() {
    let backend = MockBackend::new();
    let req = TestRequest {
        language: "python 3".to_string(),
        ..request()
    };
    let report = grader(&backend).grade(&req).unwrap();

    assert_eq!(backend.calls().ensured[0].language, "python_3");
    assert_eq!(report.summary.language, "python_3");
}

#[test]
fn test_spawn_failure_is_an_error() {
    let backend = MockBackend::new().with_spawn_failure();
    let err = grader(&backend).grade(&request()).unwrap_err();

    assert!(matches!(err, GradeError::Backend(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_custom_marker_reaches_program_and_extractor() {
    let config = ExcerptConfig {
        marker_token: "HarnessCase".to_string(),
        ..Default::default()
    };
    let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 9, in HarnessCase\nTypeError: boom\n";
    let backend = MockBackend::new().with_output(1, stderr);
    let report = Grader::new(&backend, &backend, &backend, config)
        .grade(&request())
        .unwrap();

    assert!(backend.calls().programs[0].contains("loadTestsFromTestCase(HarnessCase)"));
    let error = report.response.error().unwrap();
    assert!(error.contains("in HarnessCase"));
    assert!(error.ends_with("TypeError: boom"));
}

#[test]
fn test_concurrent_grading_is_independent() {
    let backend = MockBackend::new().with_output(0, fixtures::transcript("assertion_failure.txt"));
    let grader = grader(&backend);

    let responses: Vec<GradeResponse> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let grader = &grader;
                s.spawn(move || {
                    let req = TestRequest {
                        env: format!("env{}", i),
                        ..request()
                    };
                    grader.grade(&req).unwrap().response
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(responses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(backend.calls().programs.len(), 4);
}
