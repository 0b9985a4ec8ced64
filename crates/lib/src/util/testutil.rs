//! Test utilities for qiboot-lib.
//!
//! Cross-platform shell helpers, plus a fake system interpreter that stands in
//! for `python3 -m venv` so the bootstrap pipeline can run without network
//! access or a real Python.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns a command that runs `script` in the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> Command {
  let mut cmd = Command::new("/bin/sh");
  cmd.arg("-c").arg(script);
  cmd
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> Command {
  let mut cmd = Command::new("cmd.exe");
  cmd.arg("/C").arg(script);
  cmd
}

/// Fake system interpreter.
///
/// `-m venv DIR` creates `DIR/bin/{python,pip,streamlit}`. The environment's
/// `python -m pip ...` appends its arguments to `DIR/install.log` and fails
/// for any requirement containing `unsatisfiable`. `python -c "import X"`
/// fails when `FAKE_MISSING_IMPORT=X`. The launcher echoes its arguments, cwd
/// and `VIRTUAL_ENV`, then exits with `FAKE_STREAMLIT_EXIT`;
/// `FAKE_NO_LAUNCHER` leaves it out entirely.
///
/// The CLI integration tests carry the same script in
/// `tests/integration/common.rs`; change both together.
pub const FAKE_PYTHON: &str = r##"#!/bin/sh
if [ "$1" != "-m" ] || [ "$2" != "venv" ]; then
  echo "fake python: unsupported arguments: $*" >&2
  exit 2
fi
env_dir="$3"
mkdir -p "$env_dir/bin" || exit 1
cat > "$env_dir/bin/python" <<'EOF'
#!/bin/sh
root="$(cd "$(dirname "$0")/.." && pwd)"
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
  shift 2
  echo "$*" >> "$root/install.log"
  case "$*" in
    *unsatisfiable*) echo "ERROR: No matching distribution found" >&2; exit 1 ;;
  esac
  exit 0
fi
if [ "$1" = "-c" ]; then
  if [ -n "$FAKE_MISSING_IMPORT" ] && [ "$2" = "import $FAKE_MISSING_IMPORT" ]; then
    echo "ModuleNotFoundError: No module named '$FAKE_MISSING_IMPORT'" >&2
    exit 1
  fi
  exit 0
fi
exit 0
EOF
cp "$env_dir/bin/python" "$env_dir/bin/pip"
if [ -z "$FAKE_NO_LAUNCHER" ]; then
  cat > "$env_dir/bin/streamlit" <<'EOF'
#!/bin/sh
echo "streamlit $*"
echo "cwd: $(pwd)"
echo "VIRTUAL_ENV: $VIRTUAL_ENV"
exit "${FAKE_STREAMLIT_EXIT:-0}"
EOF
fi
chmod +x "$env_dir/bin/"*
"##;

/// Writes an executable script at `path`.
#[cfg(unix)]
pub fn write_executable(path: &Path, content: &str) {
  use std::os::unix::fs::PermissionsExt;

  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Installs the fake interpreter under `dir` and returns its path.
#[cfg(unix)]
pub fn fake_python(dir: &Path) -> PathBuf {
  let path = dir.join("system").join("python3");
  write_executable(&path, FAKE_PYTHON);
  path
}
