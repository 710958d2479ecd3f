//! # CyberAdvisor Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration for CyberAdvisor.
//! Settings control the conversation engine (input length cap, random seed),
//! the terminal presentation (colors, typing effect) and audio cue playback.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the `chat`/`ask` handlers)
//! 2. Project-specific `.cyberadvisor.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! The project search stops at the first directory containing `.git`.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! max_input_chars = 200
//! seed = 7
//!
//! [display]
//! typing_effect = false
//!
//! [audio]
//! directory = "~/sounds"
//! player = "paplay"
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config()?;
//! let cap = cfg.chat.max_input_chars;
//! ```
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

/// Settings for the conversation engine.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Inputs longer than this many characters are rejected with a warning.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    /// Fixed seed for the random source. Unset means seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Label printed in front of advisor responses.
    #[serde(default = "default_advisor_label")]
    pub advisor_label: String,
}

/// Settings for terminal rendering.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    /// Render responses character by character.
    #[serde(default = "default_true")]
    pub typing_effect: bool,
    /// Delay between characters when `typing_effect` is on.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    /// Show the ASCII logo and welcome box at startup.
    #[serde(default = "default_true")]
    pub banner: bool,
}

/// Settings for audio cue playback.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the cue files (can use ~). Will be expanded.
    #[serde(default = "default_audio_dir")]
    pub directory: String,
    /// External command used to play a file, invoked as `<player> <file>`.
    #[serde(default = "default_audio_player")]
    pub player: String,
    /// Cue name to file name mapping.
    #[serde(default = "default_audio_cues")]
    pub cues: BTreeMap<String, String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            seed: None,
            advisor_label: default_advisor_label(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            typing_effect: true,
            typing_delay_ms: default_typing_delay_ms(),
            banner: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: default_audio_dir(),
            player: default_audio_player(),
            cues: default_audio_cues(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_max_input_chars() -> usize {
    200
}
fn default_advisor_label() -> String {
    "Advisor".to_string()
}
fn default_typing_delay_ms() -> u64 {
    15
}
fn default_audio_dir() -> String {
    ".".to_string()
}
fn default_audio_player() -> String {
    if cfg!(target_os = "macos") {
        "afplay".to_string()
    } else {
        "aplay".to_string()
    }
}
fn default_audio_cues() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("welcome".to_string(), "Welcome.wav".to_string()),
        ("introduction".to_string(), "introduction.wav".to_string()),
    ])
}

const PROJECT_CONFIG_FILENAME: &str = ".cyberadvisor.toml";
const MAX_TYPING_DELAY_MS: u64 = 250;

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CyberAdvisor", "cyberadvisor") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let mut merged = user;

    if project_cfg.chat.max_input_chars != defaults.chat.max_input_chars {
        merged.chat.max_input_chars = project_cfg.chat.max_input_chars;
    }
    merged.chat.seed = project_cfg.chat.seed.or(merged.chat.seed);
    if project_cfg.chat.advisor_label != defaults.chat.advisor_label {
        merged.chat.advisor_label = project_cfg.chat.advisor_label;
    }

    if project_cfg.display.color != defaults.display.color {
        merged.display.color = project_cfg.display.color;
    }
    if project_cfg.display.typing_effect != defaults.display.typing_effect {
        merged.display.typing_effect = project_cfg.display.typing_effect;
    }
    if project_cfg.display.typing_delay_ms != defaults.display.typing_delay_ms {
        merged.display.typing_delay_ms = project_cfg.display.typing_delay_ms;
    }
    if project_cfg.display.banner != defaults.display.banner {
        merged.display.banner = project_cfg.display.banner;
    }

    if project_cfg.audio.enabled != defaults.audio.enabled {
        merged.audio.enabled = project_cfg.audio.enabled;
    }
    if project_cfg.audio.directory != defaults.audio.directory {
        merged.audio.directory = project_cfg.audio.directory;
    }
    if project_cfg.audio.player != defaults.audio.player {
        merged.audio.player = project_cfg.audio.player;
    }
    if project_cfg.audio.cues != defaults.audio.cues {
        merged.audio.cues = project_cfg.audio.cues;
    }
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    config.audio.directory = shellexpand::tilde(&config.audio.directory).into_owned();
    debug!("Expanded audio directory: {}", config.audio.directory);
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.chat.max_input_chars == 0 {
        return Err(anyhow!(AdvisorError::Config(
            "chat.max_input_chars must be greater than zero.".to_string()
        )));
    }
    if config.chat.advisor_label.trim().is_empty() {
        return Err(anyhow!(AdvisorError::Config(
            "chat.advisor_label cannot be empty.".to_string()
        )));
    }
    if config.display.typing_delay_ms > MAX_TYPING_DELAY_MS {
        return Err(anyhow!(AdvisorError::Config(format!(
            "display.typing_delay_ms is {} but may not exceed {MAX_TYPING_DELAY_MS}.",
            config.display.typing_delay_ms
        ))));
    }
    if config.audio.enabled {
        if config.audio.player.trim().is_empty() {
            return Err(anyhow!(AdvisorError::Config(
                "audio.player cannot be empty while audio is enabled.".to_string()
            )));
        }
        let audio_dir = PathBuf::from(&config.audio.directory);
        if !audio_dir.exists() {
            warn!(
                "Configured audio directory '{}' does not exist.",
                audio_dir.display()
            );
        } else if !audio_dir.is_dir() {
            return Err(anyhow!(AdvisorError::Config(format!(
                "Configured audio path '{}' exists but is not a directory.",
                audio_dir.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [chat]
            max_input_chars = 120
            seed = 99

            [display]
            typing_effect = false

            [audio]
            directory = "~/sounds"
            player = "paplay"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.chat.max_input_chars, 120);
        assert_eq!(config.chat.seed, Some(99));
        assert_eq!(config.chat.advisor_label, "Advisor"); // Default
        assert!(!config.display.typing_effect);
        assert!(config.display.color); // Default
        assert_eq!(config.display.typing_delay_ms, 15);
        assert_eq!(config.audio.directory, "~/sounds"); // Not yet expanded
        assert_eq!(config.audio.player, "paplay");
        assert_eq!(config.audio.cues["welcome"], "Welcome.wav");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[chat]\nmax_chars = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            audio: AudioConfig {
                directory: "~/advisor_sounds".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.audio.directory,
            home_dir.join("advisor_sounds").to_string_lossy()
        );
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            chat: ChatConfig {
                seed: Some(1),
                advisor_label: "Guide".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let project = Config {
            chat: ChatConfig {
                max_input_chars: 80,
                ..Default::default()
            },
            display: DisplayConfig {
                typing_effect: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));

        assert_eq!(merged.chat.max_input_chars, 80);
        assert_eq!(merged.chat.seed, Some(1)); // Kept from user
        assert_eq!(merged.chat.advisor_label, "Guide"); // Project left it at default
        assert!(!merged.display.typing_effect);
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[chat]\nseed = 5\n",
        )
        .unwrap();

        let found = find_project_config_path(&nested).expect("config should be found");
        assert_eq!(found, temp_dir.path().join(PROJECT_CONFIG_FILENAME));
        let config = load_config_from_path(&found).unwrap();
        assert_eq!(config.chat.seed, Some(5));
    }

    #[test]
    fn test_project_search_stops_at_git_dir() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILENAME),
            "[chat]\nseed = 5\n",
        )
        .unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(find_project_config_path(&repo).is_none());
    }

    #[test]
    fn test_validate_config_valid() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            audio: AudioConfig {
                directory: temp_dir.path().to_string_lossy().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_zero_input_cap() {
        let config = Config {
            chat: ChatConfig {
                max_input_chars: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_input_chars must be greater than zero"));
    }

    #[test]
    fn test_validate_config_audio_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            audio: AudioConfig {
                directory: file_path.to_string_lossy().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_ignores_audio_when_disabled() {
        let config = Config {
            audio: AudioConfig {
                enabled: false,
                player: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
