pub mod os;
pub mod paths;

use os::Os;
use std::fmt;

/// Platform identifier combining architecture and OS (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: &'static str,
  pub os: Os,
}

impl Platform {
  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS is not one qiboot supports
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: std::env::consts::ARCH,
      os: Os::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// The OS whose venv layout applies to this build.
pub fn host_os() -> Os {
  if cfg!(windows) {
    Os::Windows
  } else if cfg!(target_os = "macos") {
    Os::MacOs
  } else {
    Os::Linux
  }
}

/// Returns the platform triple for the current system (e.g., "x86_64-linux")
pub fn platform_triple() -> Option<String> {
  Platform::current().map(|p| p.triple())
}
