//! Implementation of the `qiboot plan` command.
//!
//! Prints what a run would do with the current flags without touching the
//! filesystem.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use qiboot_lib::consts::STEPS;
use qiboot_lib::requirements::Requirement;

use crate::config::EnvArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, step_banner};

#[derive(Debug, Serialize)]
struct PlanSummary {
  project_dir: PathBuf,
  env_dir: PathBuf,
  env_exists: bool,
  python: PathBuf,
  steps: Vec<&'static str>,
  requirements: Vec<Requirement>,
  launch: String,
}

pub fn cmd_plan(env: &EnvArgs, output: OutputFormat) -> Result<ExitCode> {
  let options = env.resolve()?;
  let env_dir = options.env_dir();

  let summary = PlanSummary {
    project_dir: options.project_dir.clone(),
    env_exists: env_dir.exists(),
    env_dir,
    python: options.python.clone(),
    steps: STEPS.to_vec(),
    requirements: options.requirements.clone(),
    launch: options.planned_launch().command_line(),
  };

  if output.is_json() {
    print_json(&summary)?;
    return Ok(ExitCode::SUCCESS);
  }

  print_stat("Project", &summary.project_dir.display().to_string());
  print_stat("Interpreter", &summary.python.display().to_string());
  let replace = if summary.env_exists { " (will be replaced)" } else { "" };
  print_stat("Environment", &format!("{}{}", summary.env_dir.display(), replace));
  println!();

  for (idx, title) in summary.steps.iter().enumerate() {
    println!("{}", step_banner(idx + 1, summary.steps.len(), title));
  }
  println!();

  println!("Dependencies:");
  for requirement in &summary.requirements {
    println!("  {}", requirement);
  }
  println!();

  print_info(&format!("Then: {}", summary.launch));
  Ok(ExitCode::SUCCESS)
}
