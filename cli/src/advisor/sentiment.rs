//! # CyberAdvisor Sentiment Detection
//!
//! File: cli/src/advisor/sentiment.rs
//!
//! ## Overview
//!
//! Maps user input to a coarse sentiment tag with an ordered trigger table and
//! wraps advisor responses in a tag-specific template. Detection is a plain
//! substring scan: the first trigger in table order that occurs in the input
//! decides the tag.
//!
use std::fmt;

/// Coarse emotional classification of a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Worried,
    Curious,
    Frustrated,
    Positive,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Worried => "worried",
            Sentiment::Curious => "curious",
            Sentiment::Frustrated => "frustrated",
            Sentiment::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (trigger, tag) in match order.
const TRIGGERS: &[(&str, Sentiment)] = &[
    ("worried", Sentiment::Worried),
    ("worry", Sentiment::Worried),
    ("scared", Sentiment::Worried),
    ("afraid", Sentiment::Worried),
    ("anxious", Sentiment::Worried),
    ("nervous", Sentiment::Worried),
    ("concerned", Sentiment::Worried),
    ("scary", Sentiment::Worried),
    ("overwhelmed", Sentiment::Worried),
    ("frustrated", Sentiment::Frustrated),
    ("frustrating", Sentiment::Frustrated),
    ("annoyed", Sentiment::Frustrated),
    ("confused", Sentiment::Frustrated),
    ("confusing", Sentiment::Frustrated),
    ("difficult", Sentiment::Frustrated),
    ("hard", Sentiment::Frustrated),
    ("curious", Sentiment::Curious),
    ("wondering", Sentiment::Curious),
    ("wonder", Sentiment::Curious),
    ("intrigued", Sentiment::Curious),
    ("fascinating", Sentiment::Curious),
    ("thank you", Sentiment::Positive),
    ("thanks", Sentiment::Positive),
    ("thank", Sentiment::Positive),
    ("great", Sentiment::Positive),
    ("good", Sentiment::Positive),
    ("happy", Sentiment::Positive),
    ("helpful", Sentiment::Positive),
    ("excellent", Sentiment::Positive),
    ("awesome", Sentiment::Positive),
];

/// Stateless detector over the built-in trigger table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentDetector;

impl SentimentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Tag of the first trigger (table order) found in `normalized_input`.
    pub fn detect(&self, normalized_input: &str) -> Option<Sentiment> {
        TRIGGERS
            .iter()
            .find(|(trigger, _)| normalized_input.contains(trigger))
            .map(|(_, tag)| *tag)
    }

    /// The trigger word for `tag` present in `input`, or the tag name itself
    /// when none of that tag's triggers occur.
    pub fn trigger_for(&self, tag: Sentiment, input: &str) -> &'static str {
        let lowered = input.to_lowercase();
        TRIGGERS
            .iter()
            .find(|(trigger, t)| *t == tag && lowered.contains(trigger))
            .map(|(trigger, _)| *trigger)
            .unwrap_or_else(|| tag.as_str())
    }

    /// # Modulate Response (`modulate`)
    ///
    /// Wraps `base` in the template for `tag`. `original_input` is only used to
    /// name the specific trigger word in templates that mention it.
    pub fn modulate(&self, base: &str, tag: Sentiment, original_input: &str) -> String {
        match tag {
            Sentiment::Worried => format!(
                "It's understandable to feel {} about cybersecurity. Let's take it step by step: {base}",
                self.trigger_for(tag, original_input)
            ),
            Sentiment::Frustrated => format!(
                "I hear you, cybersecurity can feel {} at times. Let's break it down together: {base}",
                describe_frustration(self.trigger_for(tag, original_input))
            ),
            Sentiment::Curious => {
                format!("Curiosity is a great instinct when it comes to security! {base}")
            }
            Sentiment::Positive => format!("I'm glad to hear that! {base}"),
        }
    }
}

/// Frustrated triggers that describe the user ("confused") turned into words
/// that describe the subject ("confusing").
fn describe_frustration(trigger: &'static str) -> &'static str {
    match trigger {
        "frustrated" => "frustrating",
        "annoyed" => "annoying",
        "confused" => "confusing",
        other => other,
    }
}
