//! Error types for subprocess execution.

use thiserror::Error;

/// Errors that can occur while running a subprocess.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The program could not be started at all (missing, not executable).
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// Command ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },
}

impl ExecuteError {
  /// Exit code of the failed command, if it ran and exited normally.
  pub fn code(&self) -> Option<i32> {
    match self {
      ExecuteError::CmdFailed { code, .. } => *code,
      ExecuteError::Spawn { .. } => None,
    }
  }
}
