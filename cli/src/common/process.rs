//! # CyberAdvisor Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Thin wrapper around `std::process::Command` for running an external program
//! to completion. Used by the audio layer to hand cue files to the platform's
//! command-line player. Output of the child is discarded; only the exit status
//! matters.
//!
use crate::core::error::Result;
use anyhow::{bail, Context};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tracing::debug;

/// # Run Command (`run_command`)
///
/// Runs `program` with `args`, waits for it to exit and discards its output.
///
/// ## Errors
///
/// Returns an error if the program cannot be spawned (e.g. not installed) or
/// exits with a non-zero status.
pub fn run_command<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    debug!("Running external command: {:?}", command);

    let status = command
        .status()
        .with_context(|| format!("Failed to start '{program}'"))?;
    if !status.success() {
        bail!("'{program}' exited with {status}");
    }
    Ok(())
}
