//! Subprocess execution for the bootstrap steps.
//!
//! Every step that shells out goes through here so that spawning, logging
//! and exit-status handling behave the same way:
//! - `run_cmd` streams the child's output to the terminal (pip progress)
//! - `probe_cmd` captures output and reports success as a boolean

pub mod cmd;
pub mod types;

pub use cmd::{describe, probe_cmd, run_cmd};
pub use types::ExecuteError;
