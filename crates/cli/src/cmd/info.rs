use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use qiboot_lib::platform::platform_triple;
use qiboot_lib::venv::EnvLayout;

use crate::config::EnvArgs;
use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Debug, Serialize)]
struct Info {
  version: &'static str,
  platform: Option<String>,
  project_dir: PathBuf,
  python: PathBuf,
  python_exists: bool,
  layout: EnvLayout,
  env_exists: bool,
}

pub fn cmd_info(env: &EnvArgs, output: OutputFormat) -> Result<ExitCode> {
  let options = env.resolve()?;
  let layout = options.layout();

  let info = Info {
    version: env!("CARGO_PKG_VERSION"),
    platform: platform_triple(),
    project_dir: options.project_dir.clone(),
    python_exists: options.python.is_file(),
    python: options.python.clone(),
    env_exists: layout.has_interpreter(),
    layout,
  };

  if output.is_json() {
    print_json(&info)?;
    return Ok(ExitCode::SUCCESS);
  }

  println!("qiboot v{}", info.version);
  println!();
  match &info.platform {
    Some(triple) => print_stat("Platform", triple),
    None => print_stat("Platform", "unsupported"),
  }
  print_stat("Project", &info.project_dir.display().to_string());
  let python_note = if info.python_exists { "" } else { " (missing)" };
  print_stat("Interpreter", &format!("{}{}", info.python.display(), python_note));
  let env_note = if info.env_exists { "" } else { " (not created)" };
  print_stat("Environment", &format!("{}{}", info.layout.root.display(), env_note));
  print_stat("Launcher", &info.layout.launcher.display().to_string());

  Ok(ExitCode::SUCCESS)
}
