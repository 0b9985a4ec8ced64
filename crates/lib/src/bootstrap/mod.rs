//! The environment bootstrap pipeline.
//!
//! Rebuilds the project's virtual environment from scratch and prepares the
//! dashboard launch. Steps run strictly in order, each relying on the
//! previous one's effects:
//! 1. Deactivate whatever environment the caller had active (never fails)
//! 2. Remove the previous environment directory
//! 3. Create a new environment from the fixed system interpreter
//! 4. Activate it and report interpreter/pip paths
//! 5. Upgrade pip
//! 6. Install each requirement, stopping at the first failure
//! 7. Report tool paths and check the launcher resolves inside the environment
//!
//! A failing step ends the run; nothing is retried or rolled back. The
//! containment check in step 7 only ever warns.

mod types;

use std::process::Command;

use tracing::{debug, info, warn};

use crate::consts::{LAUNCHER, STEPS};
use crate::execute::run_cmd;
use crate::launch::LaunchPlan;
use crate::platform::paths;
use crate::venv::{Activation, Deactivation, EnvLayout, remove_env};

pub use types::{BootstrapError, BootstrapOptions, BootstrapResult, Containment, Progress, Silent};

/// Runs the full pipeline.
///
/// On success the returned `BootstrapResult::launch` is ready for
/// [`crate::launch::hand_off`].
pub async fn bootstrap(
  options: &BootstrapOptions,
  progress: &mut dyn Progress,
) -> Result<BootstrapResult, BootstrapError> {
  if !paths::is_plain_dir_name(&options.env_name) {
    return Err(BootstrapError::InvalidEnvName {
      name: options.env_name.clone(),
    });
  }

  let total = STEPS.len();
  let env_dir = options.env_dir();

  // 1. Deactivate
  progress.step(1, total, STEPS[0]);
  let deactivation = Deactivation::current();
  if let Some(previous) = &deactivation.previous {
    info!(previous = %previous.display(), "deactivated environment for child processes");
  }

  // 2. Remove
  progress.step(2, total, &format!("{} ({})", STEPS[1], env_dir.display()));
  let replaced = remove_env(&env_dir).map_err(|source| BootstrapError::RemoveEnv {
    path: env_dir.clone(),
    source,
  })?;
  debug!(replaced, "previous environment handled");

  // 3. Create
  progress.step(
    3,
    total,
    &format!("{} with {}", STEPS[2], options.python.display()),
  );
  let mut create = Command::new(&options.python);
  create.arg("-m").arg("venv").arg(&env_dir).current_dir(&options.project_dir);
  deactivation.apply(&mut create);
  run_cmd(create).await.map_err(|source| BootstrapError::CreateEnv {
    python: options.python.clone(),
    source,
  })?;

  // 4. Activate
  progress.step(4, total, STEPS[3]);
  let layout = EnvLayout::new(&env_dir);
  let activation = Activation::new(&layout, &deactivation)?;
  report_tools(&activation, options, progress, &["python", "pip"]);

  // 5. Upgrade pip
  progress.step(5, total, STEPS[4]);
  let mut upgrade = pip_command(&layout, &activation, options);
  upgrade.args(["install", "--upgrade", "pip"]);
  run_cmd(upgrade).await.map_err(BootstrapError::UpgradePip)?;

  // 6. Install
  let count = options.requirements.len();
  progress.step(6, total, &format!("{} ({} packages)", STEPS[5], count));
  for (idx, requirement) in options.requirements.iter().enumerate() {
    progress.installing(idx + 1, count, requirement);
    let mut install = pip_command(&layout, &activation, options);
    install.arg("install").arg(requirement.spec());
    run_cmd(install).await.map_err(|source| BootstrapError::Install {
      requirement: requirement.clone(),
      source,
    })?;
  }

  // 7. Verify
  progress.step(7, total, STEPS[6]);
  let resolved = report_tools(&activation, options, progress, &["python", "pip", LAUNCHER]);
  let launcher = resolved.into_iter().last().flatten();
  let containment = Containment::check(launcher.as_deref(), &layout.dir_name());
  if !containment.contained {
    warn!(
      launcher = ?containment.resolved,
      env = %layout.root.display(),
      "launcher does not resolve inside the environment"
    );
  }
  progress.containment(&containment);

  if !options.project_dir.join(&options.app).exists() {
    warn!(entry = %options.app.display(), "dashboard entry point not found in project directory");
  }

  let program = launcher.unwrap_or_else(|| layout.launcher.clone());
  let launch = LaunchPlan::new(program, &options.app, &options.project_dir, Some(activation.clone()));

  Ok(BootstrapResult {
    layout,
    activation,
    deactivated: deactivation.previous,
    replaced,
    installed: options.requirements.clone(),
    containment,
    launch,
  })
}

/// `<env python> -m pip` with the activated environment.
fn pip_command(layout: &EnvLayout, activation: &Activation, options: &BootstrapOptions) -> Command {
  let mut cmd = Command::new(&layout.python);
  cmd.arg("-m").arg("pip").current_dir(&options.project_dir);
  activation.apply(&mut cmd);
  cmd
}

/// Resolves each tool on the activated path and reports it.
fn report_tools(
  activation: &Activation,
  options: &BootstrapOptions,
  progress: &mut dyn Progress,
  tools: &[&str],
) -> Vec<Option<std::path::PathBuf>> {
  tools
    .iter()
    .map(|tool| {
      let path = activation.resolve(tool, &options.project_dir);
      debug!(tool, path = ?path, "resolved tool");
      progress.tool_path(tool, path.as_deref());
      path
    })
    .collect()
}
