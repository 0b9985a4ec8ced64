//! Implementation of the `qiboot clean` command.
//!
//! Removes the environment directory, leaving the project untouched.

use std::process::ExitCode;

use anyhow::{Context, Result};

use qiboot_lib::env_lock::{EnvLock, LockMode};
use qiboot_lib::venv::remove_env;

use crate::config::EnvArgs;
use crate::output::{print_info, print_success};
use crate::prompts::confirm_removal;

pub fn cmd_clean(env: &EnvArgs, force: bool) -> Result<ExitCode> {
  let options = env.resolve()?;
  let env_dir = options.env_dir();

  if !env_dir.exists() {
    print_info(&format!("Nothing to clean: {} does not exist", env_dir.display()));
    return Ok(ExitCode::SUCCESS);
  }

  if !confirm_removal(&env_dir, force)? {
    print_info("Aborted.");
    return Ok(ExitCode::SUCCESS);
  }

  let _lock = EnvLock::acquire(&options.lock_path(), &env_dir, LockMode::Exclusive, "clean")
    .context("Failed to acquire environment lock")?;

  remove_env(&env_dir).with_context(|| format!("Failed to remove {}", env_dir.display()))?;

  print_success(&format!("Removed {}", env_dir.display()));
  Ok(ExitCode::SUCCESS)
}
