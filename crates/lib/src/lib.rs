//! qiboot-lib: Core types and logic for qiboot
//!
//! This crate rebuilds the isolated Python environment the Qi-Link dashboard
//! runs in, then hands the process over to the dashboard:
//! - `Requirement`: a pinned (or unpinned) package from the dependency manifest
//! - `EnvLayout` / `Activation`: explicit tool paths and child environment
//!   replacing shell activation
//! - `bootstrap`: the sequential remove/create/install pipeline
//! - `launch`: process hand-off to the dashboard in headless mode

pub mod bootstrap;
pub mod consts;
pub mod env_lock;
pub mod execute;
pub mod launch;
pub mod platform;
pub mod requirements;
pub mod venv;
pub mod verify;
