//! Command-line configuration shared by every subcommand.
//!
//! All flags are optional; with none given the built-in defaults reproduce
//! the fixed behaviour (`./venv`, the system interpreter, the built-in
//! dependency manifest, `app.py`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qiboot_lib::bootstrap::BootstrapOptions;
use qiboot_lib::consts::{DEFAULT_APP_ENTRY, DEFAULT_ENV_DIR, DEFAULT_SYSTEM_PYTHON};
use qiboot_lib::platform::paths::{is_plain_dir_name, resolve_project_dir};
use qiboot_lib::requirements::load_requirements;

#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
  /// Project directory holding the dashboard (default: next to the executable
  /// if the entry point is there, else the current directory)
  #[arg(long, value_name = "DIR")]
  pub project_dir: Option<PathBuf>,

  /// Name of the environment directory inside the project
  #[arg(long, value_name = "NAME", default_value = DEFAULT_ENV_DIR)]
  pub env_dir: String,

  /// Interpreter used to create the environment
  #[arg(long, value_name = "PATH", default_value = DEFAULT_SYSTEM_PYTHON)]
  pub python: PathBuf,

  /// Requirements file replacing the built-in dependency manifest
  #[arg(long, value_name = "FILE")]
  pub requirements: Option<PathBuf>,

  /// Dashboard entry point, relative to the project directory
  #[arg(long, value_name = "FILE", default_value = DEFAULT_APP_ENTRY)]
  pub app: PathBuf,
}

impl Default for EnvArgs {
  fn default() -> Self {
    Self {
      project_dir: None,
      env_dir: DEFAULT_ENV_DIR.to_string(),
      python: PathBuf::from(DEFAULT_SYSTEM_PYTHON),
      requirements: None,
      app: PathBuf::from(DEFAULT_APP_ENTRY),
    }
  }
}

impl EnvArgs {
  /// Resolves the flags into pipeline options.
  pub fn resolve(&self) -> Result<BootstrapOptions> {
    if self.env_dir.trim().is_empty() {
      anyhow::bail!("--env-dir must not be empty");
    }
    if !is_plain_dir_name(&self.env_dir) {
      anyhow::bail!(
        "--env-dir must be a single directory name inside the project, got '{}'",
        self.env_dir
      );
    }

    let project_dir = resolve_project_dir(self.project_dir.as_deref(), &self.app).with_context(|| {
      match &self.project_dir {
        Some(dir) => format!("Project directory not found: {}", dir.display()),
        None => "Failed to determine the project directory".to_string(),
      }
    })?;

    let mut options = BootstrapOptions::new(&project_dir);
    options.env_name = self.env_dir.clone();
    options.python = self.python.clone();
    options.app = self.app.clone();

    if let Some(file) = &self.requirements {
      options.requirements = load_requirements(file).context("Failed to load requirements")?;
    }

    Ok(options)
  }
}
