//! In-memory backends for tests
//!
//! `MockBackend` implements all three collaborator traits. It returns a
//! scripted process output and records every call so tests can assert on
//! what the grader asked for.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{
    BackendError, BackendResult, DependencyInstaller, EnvironmentProvisioner, InstallOutcome,
    ProcessOutput, ProcessRunner,
};
use crate::harness::EnvironmentKey;

/// Calls observed by a mock backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub ensured: Vec<EnvironmentKey>,
    pub installed: Vec<Vec<String>>,
    pub programs: Vec<String>,
}

/// Scripted backend.
#[derive(Debug)]
pub struct MockBackend {
    root: PathBuf,
    install_outcome: InstallOutcome,
    output: ProcessOutput,
    fail_spawn: bool,
    calls: Mutex<MockCalls>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            root: PathBuf::from("mock-data"),
            install_outcome: InstallOutcome::Installed,
            output: ProcessOutput {
                exit_code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            },
            fail_spawn: false,
            calls: Mutex::new(MockCalls::default()),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to runs with this exit code and stderr.
    pub fn with_output(mut self, exit_code: i32, stderr: impl Into<String>) -> Self {
        self.output = ProcessOutput {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        };
        self
    }

    /// Make library installation fail with this stderr.
    pub fn with_install_failure(mut self, stderr: impl Into<String>) -> Self {
        self.install_outcome = InstallOutcome::Failed {
            stderr: stderr.into(),
        };
        self
    }

    /// Make process runs fail to spawn.
    pub fn with_spawn_failure(mut self) -> Self {
        self.fail_spawn = true;
        self
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> MockCalls {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockCalls> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EnvironmentProvisioner for MockBackend {
    fn ensure(&self, key: &EnvironmentKey) -> BackendResult<PathBuf> {
        self.lock().ensured.push(key.clone());
        Ok(key.path_under(&self.root))
    }
}

impl DependencyInstaller for MockBackend {
    fn install(&self, _env_path: &Path, libraries: &[String]) -> BackendResult<InstallOutcome> {
        self.lock().installed.push(libraries.to_vec());
        Ok(self.install_outcome.clone())
    }
}

impl ProcessRunner for MockBackend {
    fn run(&self, _env_path: &Path, source: &str) -> BackendResult<ProcessOutput> {
        self.lock().programs.push(source.to_string());
        if self.fail_spawn {
            return Err(BackendError::Spawn {
                program: "python".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "mock interpreter missing"),
            });
        }
        Ok(self.output.clone())
    }
}
