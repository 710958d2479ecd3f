//! # CyberAdvisor CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Every
//! command built here runs in a fresh temporary directory with its own config
//! home, so a developer's `config.toml` or `.cyberadvisor.toml` never leaks
//! into a test run.
//!

// Not every test crate uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Flags that make a chat session deterministic and quiet.
pub const QUIET_CHAT: &[&str] = &[
    "chat",
    "--name",
    "Tester",
    "--seed",
    "7",
    "--no-audio",
    "--no-typing",
    "--no-color",
];

/// # Get CyberAdvisor Command (`cyberadvisor_cmd`)
///
/// ## Panics
/// Panics if the `cyberadvisor` binary cannot be found via `Command::cargo_bin`.
pub fn cyberadvisor_cmd() -> Command {
    Command::cargo_bin("cyberadvisor").expect("Failed to find cyberadvisor binary for testing")
}

/// A command whose working directory and config home are inside `dir`.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = cyberadvisor_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG");
    cmd
}

pub fn workspace() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}
