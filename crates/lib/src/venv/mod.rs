//! Virtual environment layout, activation and removal.

mod activation;
mod layout;

use std::io;
use std::path::Path;

use tracing::debug;

pub use activation::{Activation, ActivationError, Deactivation};
pub use layout::EnvLayout;

/// Removes an environment directory and everything in it.
///
/// Returns `Ok(false)` if there was nothing to remove. A plain file or a
/// symlink at the path is removed too, without following the link.
pub fn remove_env(path: &Path) -> io::Result<bool> {
  let metadata = match std::fs::symlink_metadata(path) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
    Err(e) => return Err(e),
  };

  if metadata.is_dir() {
    std::fs::remove_dir_all(path)?;
  } else {
    std::fs::remove_file(path)?;
  }

  debug!(path = %path.display(), "removed environment");
  Ok(true)
}
