//! Implementation of the `qiboot verify` command.

use std::process::ExitCode;

use anyhow::{Context, Result};

use qiboot_lib::env_lock::{EnvLock, LockMode};
use qiboot_lib::verify::verify;

use crate::config::EnvArgs;
use crate::output::{print_error, print_success};

/// Imports every dependency inside the existing environment.
///
/// Exits non-zero if the environment is missing or any import fails.
pub fn cmd_verify(env: &EnvArgs) -> Result<ExitCode> {
  let options = env.resolve()?;

  let _lock = EnvLock::acquire(&options.lock_path(), &options.env_dir(), LockMode::Shared, "verify")
    .context("Failed to acquire environment lock")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(verify(&options.layout(), &options.requirements, &options.project_dir))
    .context("Verification failed")?;

  for check in &report.checks {
    if check.importable {
      print_success(&format!("{} ({})", check.requirement.name, check.requirement.import_name));
    } else {
      print_error(&format!(
        "{} ({}) cannot be imported",
        check.requirement.name, check.requirement.import_name
      ));
    }
  }

  println!();
  let failed = report.failures().count();
  if failed == 0 {
    print_success(&format!("All {} packages import with {}", report.checks.len(), report.python.display()));
    Ok(ExitCode::SUCCESS)
  } else {
    print_error(&format!("{} of {} packages failed to import", failed, report.checks.len()));
    Ok(ExitCode::FAILURE)
  }
}
