//! # CyberAdvisor Audio Cues (`common::audio`)
//!
//! File: cli/src/common/audio/mod.rs
//!
//! ## Overview
//!
//! Plays short sound cues (welcome, introduction) at session start. Audio is
//! strictly optional: an unknown cue, a missing file, a missing player or a
//! playback error is logged as a warning and reported as `false`, and the
//! session carries on.
//!
//! ## Architecture
//!
//! - `AudioCue`: the trait the chat command plays cues through
//! - `SystemAudio`: resolves a cue to a file in the configured directory and
//!   hands it to an external player (`aplay`, `afplay`, ...) via
//!   `common::process`
//! - `SilentAudio`: used with `--no-audio` or `audio.enabled = false`
//!
use crate::common::process;
use crate::core::config::AudioConfig;
use crate::core::error::AdvisorError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Something that can play a named cue.
pub trait AudioCue {
    /// Plays `cue` to completion. Returns `true` only if it actually played.
    fn play(&self, cue: &str) -> bool;
}

/// Plays cue files with an external command-line player.
#[derive(Debug, Clone)]
pub struct SystemAudio {
    directory: PathBuf,
    player: String,
    cues: BTreeMap<String, String>,
}

impl SystemAudio {
    pub fn new(directory: impl Into<PathBuf>, player: &str, cues: BTreeMap<String, String>) -> Self {
        Self {
            directory: directory.into(),
            player: player.to_string(),
            cues,
        }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(&config.directory, &config.player, config.cues.clone())
    }

    /// Resolves and plays a cue, reporting why it could not be played.
    pub fn try_play(&self, cue: &str) -> Result<(), AdvisorError> {
        let file_name = self
            .cues
            .get(cue)
            .ok_or_else(|| AdvisorError::AudioUnavailable {
                cue: cue.to_string(),
                reason: "unknown audio cue".to_string(),
            })?;
        let path = self.directory.join(file_name);
        if !path.is_file() {
            return Err(AdvisorError::AudioUnavailable {
                cue: cue.to_string(),
                reason: format!("audio file '{}' not found", path.display()),
            });
        }
        debug!("Playing cue '{}' from {}", cue, path.display());
        process::run_command(&self.player, [&path]).map_err(|e| AdvisorError::AudioUnavailable {
            cue: cue.to_string(),
            reason: format!("{e:#}"),
        })
    }
}

impl AudioCue for SystemAudio {
    fn play(&self, cue: &str) -> bool {
        match self.try_play(cue) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

/// Never plays anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&self, _cue: &str) -> bool {
        false
    }
}

/// Chooses the audio backend from configuration.
pub fn from_config(config: &AudioConfig) -> Box<dyn AudioCue> {
    if config.enabled {
        Box::new(SystemAudio::from_config(config))
    } else {
        Box::new(SilentAudio)
    }
}
