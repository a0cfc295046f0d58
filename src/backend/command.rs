//! Command-backed collaborators
//!
//! Thin wrappers over `python -m venv`, `pip install` and `python -c`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use super::{
    BackendError, BackendResult, DependencyInstaller, EnvironmentProvisioner, InstallOutcome,
    ProcessOutput, ProcessRunner,
};
use crate::config::GraderConfig;
use crate::harness::EnvironmentKey;

fn run_command(command: &mut Command) -> BackendResult<Output> {
    let program = command.get_program().to_string_lossy().to_string();
    debug!(%program, "spawning");
    command.output().map_err(|source| BackendError::Spawn { program, source })
}

/// Creates environments with `<python> -m venv`.
#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    python: String,
    data_root: PathBuf,
}

impl VenvProvisioner {
    pub fn new(python: impl Into<String>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            data_root: data_root.into(),
        }
    }

    pub fn from_config(config: &GraderConfig) -> Self {
        Self::new(config.python.clone(), config.data_root.clone())
    }
}

impl EnvironmentProvisioner for VenvProvisioner {
    fn ensure(&self, key: &EnvironmentKey) -> BackendResult<PathBuf> {
        let path = key.path_under(&self.data_root);
        if path.exists() {
            debug!(path = %path.display(), "reusing environment");
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "creating environment");
        let output = run_command(Command::new(&self.python).arg("-m").arg("venv").arg(&path))?;
        if !output.status.success() {
            return Err(BackendError::EnvironmentFailed {
                path,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(path)
    }
}

/// Installs libraries with the environment's own pip.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    scripts_dir: String,
}

impl PipInstaller {
    pub fn new(scripts_dir: impl Into<String>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
        }
    }

    pub fn from_config(config: &GraderConfig) -> Self {
        Self::new(config.scripts_dir.clone())
    }
}

impl DependencyInstaller for PipInstaller {
    fn install(&self, env_path: &Path, libraries: &[String]) -> BackendResult<InstallOutcome> {
        let pip = env_path.join(&self.scripts_dir).join("pip");
        let output = run_command(Command::new(&pip).arg("install").args(libraries))?;

        if output.status.success() {
            info!(count = libraries.len(), "installed libraries");
            Ok(InstallOutcome::Installed)
        } else {
            Ok(InstallOutcome::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

/// Runs program source with the environment's interpreter via `-c`.
#[derive(Debug, Clone)]
pub struct InterpreterRunner {
    scripts_dir: String,
}

impl InterpreterRunner {
    pub fn new(scripts_dir: impl Into<String>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
        }
    }

    pub fn from_config(config: &GraderConfig) -> Self {
        Self::new(config.scripts_dir.clone())
    }

    /// Interpreter path inside an environment.
    pub fn interpreter(&self, env_path: &Path) -> PathBuf {
        env_path.join(&self.scripts_dir).join("python")
    }
}

impl ProcessRunner for InterpreterRunner {
    fn run(&self, env_path: &Path, source: &str) -> BackendResult<ProcessOutput> {
        let output = run_command(Command::new(self.interpreter(env_path)).arg("-c").arg(source))?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
