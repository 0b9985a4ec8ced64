//! Import checks against an existing environment.
//!
//! Each requirement's module is imported in its own interpreter process so a
//! single broken package does not hide the state of the others.

use std::path::Path;
use std::process::Command;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::execute::{ExecuteError, probe_cmd};
use crate::requirements::Requirement;
use crate::venv::{Activation, ActivationError, Deactivation, EnvLayout};

#[derive(Debug, Error)]
pub enum VerifyError {
  #[error("environment not found at {} (run `qiboot` to create it)", path.display())]
  MissingEnv { path: std::path::PathBuf },

  #[error(transparent)]
  Activate(#[from] ActivationError),

  #[error("failed to run the environment interpreter: {0}")]
  Interpreter(#[from] ExecuteError),
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportCheck {
  pub requirement: Requirement,
  pub importable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
  pub python: std::path::PathBuf,
  pub checks: Vec<ImportCheck>,
}

impl VerifyReport {
  pub fn is_success(&self) -> bool {
    self.checks.iter().all(|c| c.importable)
  }

  pub fn failures(&self) -> impl Iterator<Item = &ImportCheck> {
    self.checks.iter().filter(|c| !c.importable)
  }
}

/// Checks that every requirement imports inside the environment at `layout`.
pub async fn verify(layout: &EnvLayout, requirements: &[Requirement], cwd: &Path) -> Result<VerifyReport, VerifyError> {
  if !layout.root.is_dir() {
    return Err(VerifyError::MissingEnv {
      path: layout.root.clone(),
    });
  }

  let activation = Activation::new(layout, &Deactivation::current())?;

  let mut checks = Vec::with_capacity(requirements.len());
  for requirement in requirements {
    let mut cmd = Command::new(&layout.python);
    cmd
      .arg("-c")
      .arg(format!("import {}", requirement.import_name))
      .current_dir(cwd);
    activation.apply(&mut cmd);

    let importable = probe_cmd(cmd).await?;
    if importable {
      info!(package = %requirement.name, "import ok");
    } else {
      warn!(package = %requirement.name, module = %requirement.import_name, "import failed");
    }
    checks.push(ImportCheck {
      requirement: requirement.clone(),
      importable,
    });
  }

  Ok(VerifyReport {
    python: layout.python.clone(),
    checks,
  })
}
