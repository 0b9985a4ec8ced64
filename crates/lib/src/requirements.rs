//! The dependency manifest installed into the environment.
//!
//! The built-in manifest is fixed and always installed in the same order.
//! A requirements file can replace it; its lines use the usual
//! `name<constraint>` form, with blank lines and `#` comments skipped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while reading requirements.
#[derive(Debug, Error)]
pub enum RequirementError {
  #[error("invalid requirement '{line}': {reason}")]
  Invalid { line: String, reason: &'static str },

  #[error("failed to read requirements file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("{}:{line_no}: {source}", path.display())]
  InvalidLine {
    path: PathBuf,
    line_no: usize,
    #[source]
    source: Box<RequirementError>,
  },

  #[error("requirements file {} lists no packages", path.display())]
  Empty { path: PathBuf },
}

/// A package to install, with an optional version constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
  /// Distribution name as given to pip (e.g. `pydantic-settings`).
  pub name: String,
  /// Version constraint, verbatim (e.g. `<2` or `>=1.38,<1.42`).
  pub constraint: Option<String>,
  /// Module name used to check the package imports (e.g. `pydantic_settings`).
  pub import_name: String,
}

impl Requirement {
  pub fn new(name: &str, constraint: Option<&str>) -> Self {
    Self {
      name: name.to_string(),
      constraint: constraint.map(str::to_string),
      import_name: import_name_for(name),
    }
  }

  /// The argument handed to `pip install`.
  pub fn spec(&self) -> String {
    match &self.constraint {
      Some(constraint) => format!("{}{}", self.name, constraint),
      None => self.name.clone(),
    }
  }

  pub fn is_pinned(&self) -> bool {
    self.constraint.is_some()
  }
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.spec())
  }
}

impl FromStr for Requirement {
  type Err = RequirementError;

  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let line = line.trim();
    let invalid = |reason| RequirementError::Invalid {
      line: line.to_string(),
      reason,
    };

    let split = line
      .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
      .unwrap_or(line.len());
    let (name, rest) = line.split_at(split);

    if name.is_empty() {
      return Err(invalid("missing package name"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
      return Err(invalid("package name must start with a letter or digit"));
    }

    let rest = rest.trim();
    if !rest.is_empty() && !rest.starts_with(['<', '>', '=', '!', '~']) {
      return Err(invalid("expected a version constraint after the package name"));
    }
    let constraint: String = rest.chars().filter(|c| !c.is_whitespace()).collect();

    Ok(Requirement::new(
      name,
      (!constraint.is_empty()).then_some(constraint.as_str()),
    ))
  }
}

/// Module name a distribution is imported by.
fn import_name_for(name: &str) -> String {
  name.to_ascii_lowercase().replace(['-', '.'], "_")
}

/// The manifest the dashboard needs, in install order.
pub fn default_requirements() -> Vec<Requirement> {
  vec![
    Requirement::new("numpy", Some("<2")),
    Requirement::new("streamlit", Some(">=1.38,<1.42")),
    Requirement::new("lunar-python", None),
    Requirement::new("openai", None),
    Requirement::new("web3", None),
    Requirement::new("psutil", None),
    Requirement::new("pydantic", None),
    Requirement::new("pydantic-settings", None),
  ]
}

/// Parses requirements from text, one per line.
pub fn parse_requirements(content: &str) -> Result<Vec<(usize, Requirement)>, (usize, RequirementError)> {
  content
    .lines()
    .enumerate()
    .map(|(idx, line)| (idx + 1, line.split('#').next().unwrap_or("").trim()))
    .filter(|(_, line)| !line.is_empty())
    .map(|(line_no, line)| {
      line
        .parse::<Requirement>()
        .map(|req| (line_no, req))
        .map_err(|e| (line_no, e))
    })
    .collect()
}

/// Loads a requirements file.
pub fn load_requirements(path: &Path) -> Result<Vec<Requirement>, RequirementError> {
  let content = std::fs::read_to_string(path).map_err(|source| RequirementError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let requirements: Vec<Requirement> = parse_requirements(&content)
    .map_err(|(line_no, source)| RequirementError::InvalidLine {
      path: path.to_path_buf(),
      line_no,
      source: Box::new(source),
    })?
    .into_iter()
    .map(|(_, req)| req)
    .collect();

  if requirements.is_empty() {
    return Err(RequirementError::Empty {
      path: path.to_path_buf(),
    });
  }

  Ok(requirements)
}
