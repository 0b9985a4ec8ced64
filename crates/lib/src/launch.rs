//! Handing the process over to the dashboard.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::consts::HEADLESS_ARGS;
use crate::execute::describe;
use crate::venv::Activation;

#[derive(Debug, Error)]
pub enum LaunchError {
  #[error("failed to launch {}: {source}", program.display())]
  Exec {
    program: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("{} was terminated by a signal", program.display())]
  Signalled { program: PathBuf },
}

/// The dashboard command line: `<launcher> run <entry> --server.headless true`.
pub fn launch_args(entry: &Path) -> Vec<String> {
  let mut args = vec!["run".to_string(), entry.to_string_lossy().into_owned()];
  args.extend(HEADLESS_ARGS.iter().map(|a| a.to_string()));
  args
}

/// Everything needed to start the dashboard inside the environment.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: PathBuf,
  #[serde(skip)]
  pub activation: Option<Activation>,
}

impl LaunchPlan {
  pub fn new(program: PathBuf, entry: &Path, cwd: &Path, activation: Option<Activation>) -> Self {
    Self {
      program,
      args: launch_args(entry),
      cwd: cwd.to_path_buf(),
      activation,
    }
  }

  pub fn command(&self) -> Command {
    let mut cmd = Command::new(&self.program);
    cmd.args(&self.args).current_dir(&self.cwd);
    if let Some(activation) = &self.activation {
      activation.apply(&mut cmd);
    }
    cmd
  }

  /// The command line as it would be typed.
  pub fn command_line(&self) -> String {
    describe(&self.command())
  }
}

/// Replaces the current process with the dashboard.
///
/// Only returns on failure: the dashboard's exit status becomes the process
/// exit status.
#[cfg(unix)]
pub fn hand_off(plan: &LaunchPlan) -> Result<i32, LaunchError> {
  use std::os::unix::process::CommandExt;

  info!(cmd = %plan.command_line(), "handing off to dashboard");
  let source = plan.command().exec();
  Err(LaunchError::Exec {
    program: plan.program.clone(),
    source,
  })
}

/// Runs the dashboard to completion and returns its exit code.
///
/// Windows has no `exec`, so the exit code is forwarded instead.
#[cfg(windows)]
pub fn hand_off(plan: &LaunchPlan) -> Result<i32, LaunchError> {
  info!(cmd = %plan.command_line(), "handing off to dashboard");
  let status = plan.command().status().map_err(|source| LaunchError::Exec {
    program: plan.program.clone(),
    source,
  })?;
  status.code().ok_or_else(|| LaunchError::Signalled {
    program: plan.program.clone(),
  })
}
