//! CLI output formatting utilities.
//!
//! Step banners, colored status lines and JSON output. Progress of a run goes
//! to stdout; errors go to stderr.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// Formats a step banner, e.g. `[3/7] Creating virtual environment`.
pub fn step_banner(index: usize, total: usize, title: &str) -> String {
  format!("[{}/{}] {}", index, total, title)
}

/// Human-readable elapsed time, rounded to whole milliseconds.
pub fn format_elapsed(elapsed: Duration) -> String {
  let rounded = Duration::from_millis(elapsed.as_millis() as u64);
  humantime::format_duration(rounded).to_string()
}

pub fn print_step(index: usize, total: usize, title: &str) {
  println!();
  println!(
    "{}",
    step_banner(index, total, title).if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

pub fn print_path(label: &str, path: Option<&Path>) {
  let shown = match path {
    Some(p) => p.display().to_string(),
    None => "not found".to_string(),
  };
  println!(
    "  {} {}: {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    label,
    shown
  );
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Warning on stdout, for advisory results that are part of a run's report.
pub fn print_warning(message: &str) {
  println!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
    message.if_supports_color(Stream::Stdout, |s| s.yellow())
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
