//! Options, results and errors of the bootstrap pipeline.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::{DEFAULT_APP_ENTRY, DEFAULT_ENV_DIR, DEFAULT_SYSTEM_PYTHON};
use crate::execute::ExecuteError;
use crate::launch::LaunchPlan;
use crate::platform::paths;
use crate::requirements::{Requirement, default_requirements};
use crate::venv::{Activation, ActivationError, EnvLayout};

/// Errors that abort the pipeline. Nothing done before the failure is undone.
#[derive(Debug, Error)]
pub enum BootstrapError {
  #[error("invalid environment directory name '{name}': must be a single directory inside the project")]
  InvalidEnvName { name: String },

  #[error("failed to remove previous environment {}: {source}", path.display())]
  RemoveEnv {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to create environment with {}: {source}", python.display())]
  CreateEnv {
    python: PathBuf,
    #[source]
    source: ExecuteError,
  },

  #[error("failed to activate environment: {0}")]
  Activate(#[from] ActivationError),

  #[error("failed to upgrade pip: {0}")]
  UpgradePip(#[source] ExecuteError),

  #[error("failed to install {requirement}: {source}")]
  Install {
    requirement: Requirement,
    #[source]
    source: ExecuteError,
  },
}

/// What to build and where.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
  /// Directory the environment lives under and the dashboard runs in.
  pub project_dir: PathBuf,
  /// Name of the environment directory inside `project_dir`.
  pub env_name: String,
  /// Interpreter the environment is created from.
  pub python: PathBuf,
  /// Packages installed after pip is upgraded, in order.
  pub requirements: Vec<Requirement>,
  /// Dashboard entry point, relative to `project_dir`.
  pub app: PathBuf,
}

impl BootstrapOptions {
  /// Built-in defaults for a project directory.
  pub fn new(project_dir: &Path) -> Self {
    Self {
      project_dir: project_dir.to_path_buf(),
      env_name: DEFAULT_ENV_DIR.to_string(),
      python: PathBuf::from(DEFAULT_SYSTEM_PYTHON),
      requirements: default_requirements(),
      app: PathBuf::from(DEFAULT_APP_ENTRY),
    }
  }

  pub fn env_dir(&self) -> PathBuf {
    paths::env_dir(&self.project_dir, &self.env_name)
  }

  pub fn lock_path(&self) -> PathBuf {
    paths::env_lock_path(&self.project_dir, &self.env_name)
  }

  pub fn layout(&self) -> EnvLayout {
    EnvLayout::new(&self.env_dir())
  }

  /// Launch plan using the layout's launcher, before anything is resolved.
  pub fn planned_launch(&self) -> LaunchPlan {
    LaunchPlan::new(self.layout().launcher, &self.app, &self.project_dir, None)
  }
}

/// Outcome of the launch-tool containment check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Containment {
  /// Where the launch tool resolved to, if anywhere.
  pub resolved: Option<PathBuf>,
  /// The environment directory name that was looked for.
  pub env_name: String,
  pub contained: bool,
}

impl Containment {
  /// Lexical check: does any component of `resolved` equal `env_name`?
  pub fn check(resolved: Option<&Path>, env_name: &str) -> Self {
    let contained = resolved.is_some_and(|path| path.components().any(|c| c.as_os_str() == env_name));
    Self {
      resolved: resolved.map(Path::to_path_buf),
      env_name: env_name.to_string(),
      contained,
    }
  }
}

/// A completed pipeline, ready to hand off.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
  pub layout: EnvLayout,
  pub activation: Activation,
  /// The environment that was active when the run started, if any.
  pub deactivated: Option<PathBuf>,
  /// Whether a previous environment directory was removed.
  pub replaced: bool,
  pub installed: Vec<Requirement>,
  pub containment: Containment,
  pub launch: LaunchPlan,
}

/// Receives progress as the pipeline runs.
///
/// Implementations decide how (and whether) to show it; the pipeline itself
/// never prints.
pub trait Progress {
  /// A numbered step is starting.
  fn step(&mut self, index: usize, total: usize, title: &str);

  /// A tool path was resolved for diagnostics (`None` if not found).
  fn tool_path(&mut self, tool: &str, path: Option<&Path>);

  /// A single package install is starting.
  fn installing(&mut self, _index: usize, _total: usize, _requirement: &Requirement) {}

  /// The containment check finished.
  fn containment(&mut self, check: &Containment);
}

/// Discards all progress.
pub struct Silent;

impl Progress for Silent {
  fn step(&mut self, _index: usize, _total: usize, _title: &str) {}
  fn tool_path(&mut self, _tool: &str, _path: Option<&Path>) {}
  fn containment(&mut self, _check: &Containment) {}
}
