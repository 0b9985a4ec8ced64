//! Running prepared commands.
//!
//! Callers build a `std::process::Command` (program, args, cwd and the
//! activation or deactivation environment) and hand it over here. The
//! command is converted to a tokio command and awaited.

use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::execute::types::ExecuteError;

/// Renders a command as a single line for logs and error messages.
pub fn describe(cmd: &Command) -> String {
  std::iter::once(cmd.get_program())
    .chain(cmd.get_args())
    .map(|part| part.to_string_lossy())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Runs a command with inherited stdio and fails on a non-zero exit.
pub async fn run_cmd(cmd: Command) -> Result<(), ExecuteError> {
  let description = describe(&cmd);
  let program = cmd.get_program().to_string_lossy().into_owned();

  info!(cmd = %description, "executing command");

  let status = tokio::process::Command::from(cmd)
    .status()
    .await
    .map_err(|source| ExecuteError::Spawn { program, source })?;

  if !status.success() {
    return Err(ExecuteError::CmdFailed {
      cmd: description,
      code: status.code(),
    });
  }

  debug!(cmd = %description, "command succeeded");
  Ok(())
}

/// Runs a command quietly and reports whether it exited successfully.
///
/// Only a failure to start the program is an error.
pub async fn probe_cmd(cmd: Command) -> Result<bool, ExecuteError> {
  let description = describe(&cmd);
  let program = cmd.get_program().to_string_lossy().into_owned();

  debug!(cmd = %description, "probing");

  let output = tokio::process::Command::from(cmd)
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|source| ExecuteError::Spawn { program, source })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
      debug!(stderr = %stderr.trim(), "probe stderr");
    }
  }

  Ok(output.status.success())
}
