//! # CyberAdvisor Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout CyberAdvisor. No error
//! in a chat session is fatal: invalid input and name extraction failures are
//! turned into user-visible text by the resolver, and audio failures are
//! downgraded to warnings at the audio boundary. Only configuration problems
//! and terminal I/O failures end the process.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `AdvisorError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by command handlers
//!
//! The engine (`crate::advisor`) returns `std::result::Result<T, AdvisorError>`
//! directly so callers can match on the kind; command handlers wrap everything
//! in `anyhow` and add context.
//!
//! ## Examples
//!
//! ```rust,ignore
//! match kb.lookup("firewalls") {
//!     Ok(topic) => println!("{}", topic.display_name),
//!     Err(AdvisorError::TopicNotFound { key }) => println!("no topic '{key}'"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the CyberAdvisor application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Topic '{key}' not found in the knowledge base.")]
    TopicNotFound { key: String },

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Could not extract a name from '{input}'.")]
    NameExtractionFailed { input: String },

    #[error("Audio cue '{cue}' unavailable: {reason}")]
    AudioUnavailable { cue: String, reason: String },

    #[error("The session has already ended.")]
    SessionEnded,
}

/// Reasons a line of user input is rejected before resolution.
///
/// The `Display` text is shown to the user verbatim as a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("I didn't catch that. Could you please type something?")]
    Empty,

    #[error("That message is too long ({len} characters). Please keep it under {max} characters.")]
    TooLong { len: usize, max: usize },
}

/// Type alias for Result using anyhow::Error for command-level code.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = AdvisorError::Config("max_input_chars must be positive".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: max_input_chars must be positive"
        );

        let not_found = AdvisorError::TopicNotFound {
            key: "firewalls".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Topic 'firewalls' not found in the knowledge base."
        );

        let audio = AdvisorError::AudioUnavailable {
            cue: "welcome".into(),
            reason: "file not found".into(),
        };
        assert_eq!(
            audio.to_string(),
            "Audio cue 'welcome' unavailable: file not found"
        );
    }

    #[test]
    fn test_invalid_input_is_transparent() {
        let err: AdvisorError = InvalidInput::TooLong { len: 250, max: 200 }.into();
        assert_eq!(
            err.to_string(),
            "That message is too long (250 characters). Please keep it under 200 characters."
        );
        assert_eq!(
            AdvisorError::from(InvalidInput::Empty).to_string(),
            "I didn't catch that. Could you please type something?"
        );
    }
}
