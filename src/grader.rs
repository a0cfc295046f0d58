//! Grading pipeline
//!
//! Runs one request end to end:
//! - Validate the request
//! - Ensure the environment exists
//! - Install requested libraries
//! - Compose and run the test program
//! - Decide pass/fail and trim the error excerpt on failure

use std::time::Instant;

use grader_excerpt::{ExcerptConfig, Extractor};
use grader_protocol::{FailureKind, GradeResponse, TestRequest};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{
    BackendError, DependencyInstaller, EnvironmentProvisioner, InstallOutcome, ProcessOutput,
    ProcessRunner,
};
use crate::harness::{compose_program, EnvironmentKey};
use crate::summary::{parse_unittest_counts, GradeSummary};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl GradeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GradeError::Backend(_) => 3,
        }
    }
}

/// Result type for pipeline operations
pub type GradeResult<T> = Result<T, GradeError>;

/// Response plus the summary record for one grading.
#[derive(Debug, Clone)]
pub struct GradeReport {
    pub response: GradeResponse,
    pub summary: GradeSummary,
}

/// Whether a finished run counts as passing.
///
/// unittest reports to stderr, so a passing run still has stderr; its last
/// line is `OK`, optionally followed by details such as `(skipped=1)`.
pub fn run_passed(output: &ProcessOutput) -> bool {
    if output.succeeded() && output.stderr.is_empty() {
        return true;
    }
    matches!(
        output.stderr.lines().last(),
        Some(last) if last == "OK" || last.starts_with("OK (")
    ) && output.stderr.ends_with('\n')
}

/// Drives the collaborators for each request.
pub struct Grader<P, I, R> {
    provisioner: P,
    installer: I,
    runner: R,
    extractor: Extractor,
}

impl<P, I, R> Grader<P, I, R>
where
    P: EnvironmentProvisioner,
    I: DependencyInstaller,
    R: ProcessRunner,
{
    pub fn new(provisioner: P, installer: I, runner: R, excerpt: ExcerptConfig) -> Self {
        Self {
            provisioner,
            installer,
            runner,
            extractor: Extractor::new(excerpt),
        }
    }

    /// Grade one request.
    ///
    /// Test failures, install failures and invalid requests are reported in
    /// the response; only collaborator errors (e.g. an interpreter that cannot
    /// be started) are returned as `Err`.
    pub fn grade(&self, request: &TestRequest) -> GradeResult<GradeReport> {
        let started = Instant::now();
        let key = EnvironmentKey::from_request(request);
        let mut summary = GradeSummary::new(&key.language, &key.env, request.libraries.clone());

        let response = self.grade_inner(request, &key, &mut summary)?;

        let elapsed = started.elapsed().as_millis() as u64;
        info!(
            grade_id = %summary.grade_id,
            success = response.is_success(),
            duration_ms = elapsed,
            "graded"
        );
        let summary = summary.finish(&response, elapsed);
        Ok(GradeReport { response, summary })
    }

    fn grade_inner(
        &self,
        request: &TestRequest,
        key: &EnvironmentKey,
        summary: &mut GradeSummary,
    ) -> GradeResult<GradeResponse> {
        if let Err(e) = request.validate() {
            warn!(error = %e, "rejecting request");
            return Ok(GradeResponse::failure(FailureKind::InvalidRequest, e.to_string()));
        }

        let env_path = self.provisioner.ensure(key)?;
        debug!(env = %env_path.display(), "environment ready");

        if !request.libraries.is_empty() {
            debug!(libraries = ?request.libraries, "installing libraries");
            if let InstallOutcome::Failed { stderr } = self.installer.install(&env_path, &request.libraries)? {
                return Ok(GradeResponse::failure(FailureKind::InstallFailed, stderr));
            }
        }

        let program = compose_program(request, &self.extractor.config().marker_token);
        let output = self.runner.run(&env_path, &program)?;
        summary.exit_code = output.exit_code;
        summary.tests = parse_unittest_counts(&output.stderr);
        debug!(exit_code = ?output.exit_code, stderr_bytes = output.stderr.len(), "test process finished");

        if run_passed(&output) {
            return Ok(GradeResponse::Success);
        }

        Ok(match self.extractor.extract(&output.stderr) {
            Ok(excerpt) => GradeResponse::failure(FailureKind::TestFailed, excerpt.render()),
            Err(e) => {
                warn!(error = %e, "could not extract error excerpt");
                GradeResponse::failure(
                    FailureKind::UnparsedOutput,
                    format!("{}: {}", FailureKind::UnparsedOutput.description(), e),
                )
            }
        })
    }
}
