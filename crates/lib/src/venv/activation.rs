//! Child-process environments for the bootstrap steps.
//!
//! A shell "activates" a virtual environment by mutating its own `PATH`.
//! Here the before and after states are plain values applied to each
//! `Command` that needs them; the process environment is never touched.

use std::env::{self, JoinPathsError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

use super::layout::EnvLayout;
use crate::platform::host_os;

#[derive(Debug, Error)]
pub enum ActivationError {
  #[error("no interpreter in environment: {} does not exist", path.display())]
  MissingInterpreter { path: PathBuf },

  #[error("cannot put {} on PATH: {source}", path.display())]
  InvalidPath { path: PathBuf, source: JoinPathsError },
}

/// The ambient environment with any active virtual environment taken off.
///
/// Built from `VIRTUAL_ENV` and `PATH`; building it never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deactivation {
  /// The virtual environment that was active, if any.
  pub previous: Option<PathBuf>,
  /// Search path without the previous environment's executables.
  pub path: Option<OsString>,
}

impl Deactivation {
  /// Deactivates whatever environment the current process inherited.
  pub fn current() -> Self {
    Self::from_vars(env::var_os("VIRTUAL_ENV"), env::var_os("PATH"))
  }

  pub fn from_vars(virtual_env: Option<OsString>, path: Option<OsString>) -> Self {
    let previous = virtual_env.filter(|v| !v.is_empty()).map(PathBuf::from);

    let stripped = match (&previous, &path) {
      (Some(active), Some(search)) => strip_from_path(active, search),
      _ => None,
    };

    Self {
      previous,
      path: stripped.or(path),
    }
  }

  pub fn apply(&self, cmd: &mut Command) {
    cmd.env_remove("VIRTUAL_ENV").env_remove("PYTHONHOME");
    if let Some(path) = &self.path {
      cmd.env("PATH", path);
    }
  }
}

/// Removes `active`'s executables directory from a search path.
fn strip_from_path(active: &Path, search: &OsStr) -> Option<OsString> {
  let bin = active.join(host_os().venv_bin_dir());
  let kept: Vec<PathBuf> = env::split_paths(search).filter(|entry| entry != &bin).collect();

  match env::join_paths(&kept) {
    Ok(stripped) => {
      debug!(previous = %active.display(), "removed active environment from PATH");
      Some(stripped)
    }
    Err(e) => {
      warn!(error = %e, "could not rebuild PATH without the active environment, leaving it as is");
      None
    }
  }
}

/// The child environment of an activated virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
  pub virtual_env: PathBuf,
  pub path: OsString,
}

impl Activation {
  /// Activates `layout` on top of a deactivated environment.
  pub fn new(layout: &EnvLayout, base: &Deactivation) -> Result<Self, ActivationError> {
    if !layout.has_interpreter() {
      return Err(ActivationError::MissingInterpreter {
        path: layout.python.clone(),
      });
    }

    let mut entries = vec![layout.bin_dir.clone()];
    if let Some(search) = &base.path {
      entries.extend(env::split_paths(search));
    }
    let path = env::join_paths(&entries).map_err(|source| ActivationError::InvalidPath {
      path: layout.bin_dir.clone(),
      source,
    })?;

    debug!(bin_dir = %layout.bin_dir.display(), "activated environment");

    Ok(Self {
      virtual_env: layout.root.clone(),
      path,
    })
  }

  pub fn apply(&self, cmd: &mut Command) {
    cmd
      .env("VIRTUAL_ENV", &self.virtual_env)
      .env("PATH", &self.path)
      .env_remove("PYTHONHOME");
  }

  /// Resolves `tool` against the activated search path, the way `which`
  /// would inside an activated shell.
  pub fn resolve(&self, tool: &str, cwd: &Path) -> Option<PathBuf> {
    which::which_in(tool, Some(&self.path), cwd).ok()
  }
}
