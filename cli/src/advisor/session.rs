//! # CyberAdvisor Session State
//!
//! File: cli/src/advisor/session.rs
//!
//! Per-session mutable state: who is talking, what they asked, which topics
//! they saw and what the advisor remembers about them. One `SessionState`
//! belongs to exactly one resolver; nothing here is shared or global.
//!
use super::memory::MemoryStore;
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub user_name: String,
    pub started_at: DateTime<Local>,
    pub questions_asked: u32,
    /// Display names in first-seen order, without duplicates.
    topics_viewed: Vec<String>,
    /// Key of the topic follow-ups refer to.
    pub current_topic: Option<String>,
    pub memory: MemoryStore,
}

impl SessionState {
    pub fn new(user_name: &str) -> Self {
        Self::starting_at(user_name, Local::now())
    }

    pub fn starting_at(user_name: &str, started_at: DateTime<Local>) -> Self {
        let mut memory = MemoryStore::new();
        memory.record_name(user_name);
        Self {
            user_name: user_name.to_string(),
            started_at,
            questions_asked: 0,
            topics_viewed: Vec::new(),
            current_topic: None,
            memory,
        }
    }

    /// Adds a topic display name unless it was already viewed.
    pub fn mark_topic_viewed(&mut self, display_name: &str) {
        if !self.topics_viewed.iter().any(|t| t == display_name) {
            self.topics_viewed.push(display_name.to_string());
        }
    }

    pub fn topics_viewed(&self) -> &[String] {
        &self.topics_viewed
    }

    /// Summary as of `now`.
    pub fn summary_at(&self, now: DateTime<Local>) -> SessionSummary {
        let elapsed = (now - self.started_at).num_seconds().max(0);
        SessionSummary {
            user_name: self.user_name.clone(),
            minutes: elapsed / 60,
            seconds: elapsed % 60,
            topics_viewed: self.topics_viewed.clone(),
            questions_asked: self.questions_asked,
            interest: self.memory.interest().map(str::to_string),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary_at(Local::now())
    }
}

/// End-of-session report shown on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub user_name: String,
    pub minutes: i64,
    pub seconds: i64,
    pub topics_viewed: Vec<String>,
    pub questions_asked: u32,
    pub interest: Option<String>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session Summary for {}:", self.user_name)?;
        writeln!(
            f,
            "- Session duration: {} minutes, {} seconds",
            self.minutes, self.seconds
        )?;
        write!(f, "- Topics explored: {}", self.topics_viewed.len())?;
        if !self.topics_viewed.is_empty() {
            write!(f, " ({})", self.topics_viewed.join(", "))?;
        }
        write!(f, "\n- Questions asked: {}", self.questions_asked)?;
        if let Some(interest) = &self.interest {
            write!(f, "\n- Your main interest: {interest}")?;
        }
        Ok(())
    }
}
