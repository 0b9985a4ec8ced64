//! Project and environment path resolution.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves the directory the environment is created beneath.
///
/// Order: the explicit directory, then the directory of the running
/// executable when the entry point sits next to it, then the current
/// working directory. The result is canonical (without `\\?\` on Windows).
pub fn resolve_project_dir(explicit: Option<&Path>, entry: &Path) -> io::Result<PathBuf> {
  let exe_dir = std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(Path::to_path_buf));
  let cwd = std::env::current_dir()?;
  resolve_project_dir_from(explicit, entry, exe_dir.as_deref(), &cwd)
}

fn resolve_project_dir_from(
  explicit: Option<&Path>,
  entry: &Path,
  exe_dir: Option<&Path>,
  cwd: &Path,
) -> io::Result<PathBuf> {
  if let Some(dir) = explicit {
    return dunce::canonicalize(dir);
  }

  if let Some(dir) = exe_dir
    && dir.join(entry).is_file()
  {
    return dunce::canonicalize(dir);
  }

  dunce::canonicalize(cwd)
}

/// Whether `name` is a single plain directory name.
///
/// Rejects `.`, `..`, absolute paths and anything with more than one
/// component, so the environment can never resolve outside the project.
pub fn is_plain_dir_name(name: &str) -> bool {
  let mut components = Path::new(name).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(_)), None)
  )
}

/// Returns the environment directory for a project.
pub fn env_dir(project_dir: &Path, env_name: &str) -> PathBuf {
  project_dir.join(env_name)
}

/// Returns the lock file guarding an environment directory.
///
/// The lock lives beside the environment, not inside it, so it survives the
/// directory being removed and recreated.
pub fn env_lock_path(project_dir: &Path, env_name: &str) -> PathBuf {
  let name = Path::new(env_name)
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| env_name.to_string());
  project_dir.join(format!(".{}.lock", name))
}
