//! # CyberAdvisor Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared collaborators the chat front end uses around the conversation
//! engine. They handle terminal and device I/O only; response selection lives
//! in `crate::advisor`.
//!
//! ## Architecture
//!
//! - **`audio`**: The `AudioCue` trait and its system-player and silent implementations.
//! - **`process`**: Running an external program to completion (used for audio playback).
//! - **`ui`**: Colored console output, the startup banner and the typing effect.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::common::{audio, ui};
//!
//! let mut console = ui::Console::stdout(ui::ConsoleOptions::default());
//! console.banner()?;
//! let player = audio::from_config(&config.audio);
//! player.play("welcome");
//! ```
//!

/// Audio cue playback with graceful degradation when sound is unavailable.
pub mod audio;
/// External process execution.
pub mod process;
/// Terminal rendering: colors, banner, typing effect.
pub mod ui;
