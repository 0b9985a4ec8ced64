//! End-to-end tests driving the qiboot binary against a fake interpreter.

#![cfg(unix)]

mod env_tests;
mod run_tests;
