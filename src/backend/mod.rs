//! Grading backends
//!
//! The grader drives three collaborators: one that makes sure an isolated
//! interpreter environment exists, one that installs libraries into it, and
//! one that executes a program inside it. `command` implements them with
//! external processes; `mock` implements them in memory for tests.

pub mod command;
pub mod mock;

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::harness::EnvironmentKey;

pub use command::{InterpreterRunner, PipInstaller, VenvProvisioner};

/// Errors from backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create environment at {}: {stderr}", path.display())]
    EnvironmentFailed { path: PathBuf, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Captured result of running a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Exit code; None when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Result of a library installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Failed { stderr: String },
}

/// Creates an isolated environment if it does not exist yet.
pub trait EnvironmentProvisioner {
    /// Return the environment directory, creating the environment if absent.
    fn ensure(&self, key: &EnvironmentKey) -> BackendResult<PathBuf>;
}

/// Installs libraries into an environment.
pub trait DependencyInstaller {
    fn install(&self, env_path: &Path, libraries: &[String]) -> BackendResult<InstallOutcome>;
}

/// Executes program source inside an environment.
pub trait ProcessRunner {
    fn run(&self, env_path: &Path, source: &str) -> BackendResult<ProcessOutput>;
}

impl<T: EnvironmentProvisioner + ?Sized> EnvironmentProvisioner for &T {
    fn ensure(&self, key: &EnvironmentKey) -> BackendResult<PathBuf> {
        (**self).ensure(key)
    }
}

impl<T: DependencyInstaller + ?Sized> DependencyInstaller for &T {
    fn install(&self, env_path: &Path, libraries: &[String]) -> BackendResult<InstallOutcome> {
        (**self).install(env_path, libraries)
    }
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, env_path: &Path, source: &str) -> BackendResult<ProcessOutput> {
        (**self).run(env_path, source)
    }
}
