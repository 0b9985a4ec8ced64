//! Verify, info and clean against a built environment.

use predicates::prelude::*;

use super::common::TestEnv;

fn built_env() -> TestEnv {
  let env = TestEnv::new();
  env.qiboot_cmd("run").arg("--no-launch").assert().success();
  env
}

#[test]
fn verify_passes_after_run() {
  let env = built_env();

  env
    .qiboot_cmd("verify")
    .assert()
    .success()
    .stdout(predicate::str::contains("lunar-python (lunar_python)"))
    .stdout(predicate::str::contains("All 8 packages import"));
}

#[test]
fn verify_reports_missing_import() {
  let env = built_env();

  env
    .qiboot_cmd("verify")
    .env("FAKE_MISSING_IMPORT", "pydantic_settings")
    .assert()
    .failure()
    .stderr(predicate::str::contains("pydantic-settings (pydantic_settings) cannot be imported"))
    .stderr(predicate::str::contains("1 of 8 packages failed to import"));
}

#[test]
fn info_reports_built_environment() {
  let env = built_env();

  env
    .qiboot_cmd("info")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("Environment: {}", env.env_dir().display())))
    .stdout(predicate::str::contains("(not created)").not());
}

#[test]
fn plan_notes_existing_environment() {
  let env = built_env();

  env
    .qiboot_cmd("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("(will be replaced)"));
}

#[test]
fn clean_requires_confirmation_when_not_interactive() {
  let env = built_env();

  env
    .qiboot_cmd("clean")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--force"));

  assert!(env.env_dir().exists());
}

#[test]
fn clean_force_removes_environment() {
  let env = built_env();

  env
    .qiboot_cmd("clean")
    .arg("--force")
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  assert!(!env.env_dir().exists());
  assert!(env.project.join("app.py").exists(), "project files are untouched");
}

#[test]
fn clean_rejects_env_dir_outside_project() {
  let env = built_env();
  env.write_file("keep.txt", "sibling");

  for name in [".", ".."] {
    env
      .qiboot_cmd("clean")
      .args(["--force", "--env-dir", name])
      .assert()
      .failure()
      .stdout(predicate::str::contains("Removed").not())
      .stderr(predicate::str::contains("--env-dir must be a single directory name"));
  }

  assert!(env.project.join("app.py").is_file());
  assert!(env.temp.path().join("keep.txt").is_file());
  assert!(env.env_dir().exists());
}
