use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::LAUNCHER;
use crate::platform::host_os;
use crate::platform::os::Os;

/// Tool paths inside a virtual environment.
///
/// Later steps address the environment's interpreter and tools through this
/// value rather than through a shell's `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvLayout {
  pub root: PathBuf,
  pub bin_dir: PathBuf,
  pub python: PathBuf,
  pub pip: PathBuf,
  pub launcher: PathBuf,
}

impl EnvLayout {
  /// Layout of an environment rooted at `root` on the host OS.
  pub fn new(root: &Path) -> Self {
    Self::for_os(root, host_os())
  }

  pub fn for_os(root: &Path, os: Os) -> Self {
    let bin_dir = root.join(os.venv_bin_dir());
    let exe = |name: &str| bin_dir.join(format!("{}{}", name, os.exe_suffix()));
    Self {
      python: exe("python"),
      pip: exe("pip"),
      launcher: exe(LAUNCHER),
      root: root.to_path_buf(),
      bin_dir,
    }
  }

  /// Whether the environment has an interpreter where one is expected.
  pub fn has_interpreter(&self) -> bool {
    self.python.is_file()
  }

  /// Name of the environment directory (its last path component).
  pub fn dir_name(&self) -> String {
    self
      .root
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default()
  }
}
