//! Run command integration tests.

use predicates::prelude::*;

use qiboot_lib::env_lock::{EnvLock, LockMode};

use super::common::{TestEnv, write_executable};

fn expected_install_log() -> Vec<String> {
  [
    "install --upgrade pip",
    "install numpy<2",
    "install streamlit>=1.38,<1.42",
    "install lunar-python",
    "install openai",
    "install web3",
    "install psutil",
    "install pydantic",
    "install pydantic-settings",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

#[test]
fn run_builds_env_and_hands_off_to_dashboard() {
  let env = TestEnv::new();

  env
    .qiboot_cmd("run")
    .assert()
    .success()
    .stdout(predicate::str::contains("[1/7] Deactivating any active virtual environment"))
    .stdout(predicate::str::contains("[2/7] Removing previous environment"))
    .stdout(predicate::str::contains("[3/7] Creating virtual environment"))
    .stdout(predicate::str::contains("[4/7] Activating virtual environment"))
    .stdout(predicate::str::contains("[5/7] Upgrading pip"))
    .stdout(predicate::str::contains("[6/7] Installing dependencies"))
    .stdout(predicate::str::contains("[7/7] Verifying installation"))
    .stdout(predicate::str::contains("streamlit resolves inside the environment"))
    .stdout(predicate::str::contains("Environment ready"))
    .stdout(predicate::str::contains("\nstreamlit run app.py --server.headless true\n"))
    .stdout(predicate::str::contains(format!("cwd: {}", env.project.display())))
    .stdout(predicate::str::contains(format!("VIRTUAL_ENV: {}", env.env_dir().display())));

  assert_eq!(env.install_log(), expected_install_log());
}

#[test]
fn run_reports_tool_paths_inside_env() {
  let env = TestEnv::new();
  let bin = env.env_dir().join("bin");

  env
    .qiboot_cmd("run")
    .arg("--no-launch")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("python: {}", bin.join("python").display())))
    .stdout(predicate::str::contains(format!("pip: {}", bin.join("pip").display())))
    .stdout(predicate::str::contains(format!("streamlit: {}", bin.join("streamlit").display())));
}

#[test]
fn dashboard_exit_code_is_forwarded() {
  let env = TestEnv::new();

  env
    .qiboot_cmd("run")
    .env("FAKE_STREAMLIT_EXIT", "3")
    .assert()
    .code(3)
    .stdout(predicate::str::contains("\nstreamlit run app.py --server.headless true\n"));
}

#[test]
fn project_dir_defaults_to_cwd() {
  let env = TestEnv::new();

  assert_cmd::cargo::cargo_bin_cmd!("qiboot")
    .args(["run", "--no-launch", "--python"])
    .arg(&env.python)
    .current_dir(&env.project)
    .env_remove("VIRTUAL_ENV")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("({})", env.env_dir().display())));

  assert_eq!(env.install_log(), expected_install_log());
}

#[test]
fn rerun_replaces_environment() {
  let env = TestEnv::new();

  env.qiboot_cmd("run").arg("--no-launch").assert().success();
  let first = env.install_log();
  env.write_file("project/venv/stale.txt", "left over");

  env
    .qiboot_cmd("run")
    .arg("--no-launch")
    .assert()
    .success()
    .stdout(predicate::str::contains("Launch skipped"));

  assert_eq!(env.install_log(), first);
  assert!(!env.env_dir().join("stale.txt").exists());
}

#[test]
fn no_launch_stops_before_dashboard() {
  let env = TestEnv::new();

  env
    .qiboot_cmd("run")
    .arg("--no-launch")
    .assert()
    .success()
    .stdout(predicate::str::contains("Launch skipped"))
    .stdout(predicate::str::contains("\nstreamlit run").not());

  assert!(env.env_dir().join("bin").join("python").is_file());
}

#[test]
fn failed_install_aborts_before_launch() {
  let env = TestEnv::new();
  let requirements = env.write_file("requirements.txt", "numpy<2\nunsatisfiable==0.0.0\nstreamlit\n");

  env
    .qiboot_cmd("run")
    .arg("--requirements")
    .arg(&requirements)
    .assert()
    .failure()
    .stdout(predicate::str::contains("[6/7] Installing dependencies"))
    .stdout(predicate::str::contains("[7/7]").not())
    .stdout(predicate::str::contains("streamlit run").not())
    .stderr(predicate::str::contains("failed to install unsatisfiable==0.0.0"));

  assert!(env.env_dir().exists(), "partial environment is left in place");
  assert_eq!(
    env.install_log(),
    vec!["install --upgrade pip", "install numpy<2", "install unsatisfiable==0.0.0"]
  );
}

#[test]
fn missing_interpreter_fails_without_installing() {
  let env = TestEnv::new();

  env
    .qiboot_cmd_with_python("run", &env.temp.path().join("no-such-python3"))
    .assert()
    .failure()
    .stdout(predicate::str::contains("[4/7]").not())
    .stderr(predicate::str::contains("failed to create environment"));

  assert!(env.install_log().is_empty());
}

#[test]
fn launcher_outside_env_warns_and_continues() {
  let env = TestEnv::new();
  let system_bin = env.temp.path().join("system-bin");
  write_executable(&system_bin.join("streamlit"), "#!/bin/sh\necho \"system streamlit $*\"\n");

  env
    .qiboot_cmd("run")
    .env("FAKE_NO_LAUNCHER", "1")
    .env("PATH", env.path_with(&system_bin))
    .assert()
    .success()
    .stdout(predicate::str::contains("WARNING: streamlit resolves outside the 'venv' environment"))
    .stdout(predicate::str::contains("system streamlit run app.py --server.headless true"));
}

#[test]
fn unrelated_active_env_is_deactivated() {
  let env = TestEnv::new();
  let other = env.temp.path().join("other-venv");
  std::fs::create_dir_all(other.join("bin")).unwrap();

  env
    .qiboot_cmd("run")
    .arg("--no-launch")
    .env("VIRTUAL_ENV", &other)
    .env("PATH", env.path_with(&other.join("bin")))
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("Deactivated: {}", other.display())));
}

#[test]
fn held_lock_fails_fast() {
  let env = TestEnv::new();
  let _lock = EnvLock::acquire(
    &env.project.join(".venv.lock"),
    &env.env_dir(),
    LockMode::Exclusive,
    "test",
  )
  .unwrap();

  env
    .qiboot_cmd("run")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Environment is locked"));

  assert!(!env.env_dir().exists());
}

#[test]
fn env_dir_outside_project_is_rejected() {
  let env = TestEnv::new();
  env.write_file("keep.txt", "sibling");

  for name in [".", "..", "/x", "a/b"] {
    env
      .qiboot_cmd("run")
      .args(["--no-launch", "--env-dir", name])
      .assert()
      .failure()
      .stdout(predicate::str::contains("[2/7]").not())
      .stderr(predicate::str::contains("--env-dir must be a single directory name"));
  }

  assert!(env.project.join("app.py").is_file(), "project files are untouched");
  assert!(env.temp.path().join("keep.txt").is_file(), "parent directory is untouched");
  assert!(env.install_log().is_empty());
}
