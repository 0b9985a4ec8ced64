/// Default name of the environment directory, relative to the project directory.
pub const DEFAULT_ENV_DIR: &str = "venv";

/// Default dashboard entry point, relative to the project directory.
pub const DEFAULT_APP_ENTRY: &str = "app.py";

/// The interpreter the environment is created from. A fixed path so that a
/// distribution-managed `python3` earlier on `PATH` is never picked up.
#[cfg(not(windows))]
pub const DEFAULT_SYSTEM_PYTHON: &str = "/usr/bin/python3";

#[cfg(windows)]
pub const DEFAULT_SYSTEM_PYTHON: &str = r"C:\Windows\py.exe";

/// Tool the dashboard is launched with.
pub const LAUNCHER: &str = "streamlit";

/// Flags that keep the dashboard from opening a browser.
pub const HEADLESS_ARGS: [&str; 2] = ["--server.headless", "true"];

/// Titles of the numbered bootstrap steps, in execution order.
pub const STEPS: [&str; 7] = [
  "Deactivating any active virtual environment",
  "Removing previous environment",
  "Creating virtual environment",
  "Activating virtual environment",
  "Upgrading pip",
  "Installing dependencies",
  "Verifying installation",
];
