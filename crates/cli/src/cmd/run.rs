//! Implementation of the `qiboot run` command (also the default).
//!
//! Rebuilds the environment from scratch, installs the dependency manifest
//! and replaces this process with the dashboard.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use qiboot_lib::bootstrap::{Containment, Progress, bootstrap};
use qiboot_lib::env_lock::{EnvLock, LockMode};
use qiboot_lib::launch::hand_off;
use qiboot_lib::requirements::Requirement;

use crate::config::EnvArgs;
use crate::output::{
  format_elapsed, print_info, print_path, print_stat, print_step, print_success, print_warning, symbols,
};

/// Prints pipeline progress to stdout.
struct TerminalProgress;

impl Progress for TerminalProgress {
  fn step(&mut self, index: usize, total: usize, title: &str) {
    print_step(index, total, title);
  }

  fn tool_path(&mut self, tool: &str, path: Option<&Path>) {
    print_path(tool, path);
  }

  fn installing(&mut self, index: usize, total: usize, requirement: &Requirement) {
    println!("  {} ({}/{}) {}", symbols::INFO, index, total, requirement);
  }

  fn containment(&mut self, check: &Containment) {
    match (&check.resolved, check.contained) {
      (Some(path), true) => print_success(&format!(
        "streamlit resolves inside the environment ({})",
        path.display()
      )),
      (Some(path), false) => print_warning(&format!(
        "WARNING: streamlit resolves outside the '{}' environment ({}); launching anyway",
        check.env_name,
        path.display()
      )),
      (None, _) => print_warning(&format!(
        "WARNING: streamlit not found in the '{}' environment; launching anyway",
        check.env_name
      )),
    }
  }
}

/// Execute the run command.
///
/// Holds the environment lock for the whole setup and releases it before the
/// hand-off. On Unix a successful hand-off never returns.
pub fn cmd_run(env: &EnvArgs, no_launch: bool) -> Result<ExitCode> {
  let start = Instant::now();
  let options = env.resolve()?;
  info!(
    project = %options.project_dir.display(),
    env = %options.env_dir().display(),
    python = %options.python.display(),
    "starting bootstrap"
  );

  let lock = EnvLock::acquire(&options.lock_path(), &options.env_dir(), LockMode::Exclusive, "run")
    .context("Failed to acquire environment lock")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt
    .block_on(bootstrap(&options, &mut TerminalProgress))
    .context("Bootstrap failed")?;
  drop(rt);
  drop(lock);
  debug!(replaced = result.replaced, contained = result.containment.contained, "bootstrap finished");

  println!();
  print_success(&format!("Environment ready in {}", format_elapsed(start.elapsed())));
  print_stat("Environment", &result.layout.root.display().to_string());
  print_stat("Packages installed", &result.installed.len().to_string());
  if let Some(previous) = &result.deactivated {
    print_stat("Deactivated", &previous.display().to_string());
  }

  if no_launch {
    println!();
    print_info(&format!("Launch skipped. Start the dashboard with: {}", result.launch.command_line()));
    return Ok(ExitCode::SUCCESS);
  }

  println!();
  print_info(&format!("Launching: {}", result.launch.command_line()));
  io::stdout().flush()?;

  let code = hand_off(&result.launch).context("Failed to launch dashboard")?;
  std::process::exit(code);
}
