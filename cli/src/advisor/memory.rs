//! # CyberAdvisor Session Memory
//!
//! File: cli/src/advisor/memory.rs
//!
//! ## Overview
//!
//! A small per-session fact store. Facts are derived from what the user says
//! ("my name is ...", "I'm interested in ...") and are consulted when
//! formatting later responses. Nothing is persisted; a store lives exactly as
//! long as its session.
//!
//! ## Keys
//!
//! - `name`: the name entered at startup
//! - `preferred_name`: a name given later with "my name is ..."
//! - `interest`: lowercased display name of a topic the user said they care about
//!
use super::knowledge_base::{KnowledgeBase, Topic};
use crate::core::error::AdvisorError;
use rand::Rng;
use std::collections::HashMap;

pub const NAME_KEY: &str = "name";
pub const PREFERRED_NAME_KEY: &str = "preferred_name";
pub const INTEREST_KEY: &str = "interest";

const NAME_PHRASE: &str = "my name is";
const INTEREST_PHRASES: &[&str] = &["interested in", "like to learn about"];

/// Interest framing is applied with probability 1 in 3.
const INTEREST_ODDS: (u32, u32) = (1, 3);
/// Name prefix is applied with probability 1 in 4.
const NAME_ODDS: (u32, u32) = (1, 4);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    facts: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.facts.get(key).map(String::as_str)
    }

    pub fn record_name(&mut self, name: &str) {
        self.facts.insert(NAME_KEY.to_string(), name.to_string());
    }

    pub fn record_preferred_name(&mut self, name: &str) {
        self.facts
            .insert(PREFERRED_NAME_KEY.to_string(), name.to_string());
    }

    /// Stores a topic display name, lowercased.
    pub fn record_interest(&mut self, topic_display_name: &str) {
        self.facts
            .insert(INTEREST_KEY.to_string(), topic_display_name.to_lowercase());
    }

    pub fn interest(&self) -> Option<&str> {
        self.get(INTEREST_KEY)
    }

    pub fn preferred_name(&self) -> Option<&str> {
        self.get(PREFERRED_NAME_KEY)
    }

    /// # Extract Interest Statement (`extract_interest_statement`)
    ///
    /// Recognises statements such as "I'm interested in VPNs" or "I'd like to
    /// learn about scams". Both an interest phrase and a topic key or keyword
    /// must be present; the topic is chosen by the knowledge base's
    /// first-match scan.
    pub fn extract_interest_statement<'kb>(
        normalized_input: &str,
        kb: &'kb KnowledgeBase,
    ) -> Option<&'kb Topic> {
        if !INTEREST_PHRASES
            .iter()
            .any(|phrase| normalized_input.contains(phrase))
        {
            return None;
        }
        kb.find_by_key_or_keyword(normalized_input)
    }

    /// # Extract Name Statement (`extract_name_statement`)
    ///
    /// Looks for "my name is" (case-insensitively) and returns what follows,
    /// keeping the user's original casing.
    ///
    /// ## Returns
    ///
    /// * `Ok(None)` - the phrase is absent.
    /// * `Ok(Some(name))` - the remainder, trimmed of whitespace and trailing
    ///   `.`, `!` or `,`, is non-empty and contains a letter.
    ///
    /// ## Errors
    ///
    /// `AdvisorError::NameExtractionFailed` when the phrase is present but no
    /// usable name follows (e.g. "my name is 42").
    pub fn extract_name_statement(raw_input: &str) -> Result<Option<String>, AdvisorError> {
        let Some(start) = find_ignore_ascii_case(raw_input, NAME_PHRASE) else {
            return Ok(None);
        };
        let remainder = raw_input
            .get(start + NAME_PHRASE.len()..)
            .unwrap_or_default();
        let name = remainder
            .trim()
            .trim_end_matches(['.', '!', ','])
            .trim_end();

        if name.is_empty() || !name.chars().any(char::is_alphabetic) {
            return Err(AdvisorError::NameExtractionFailed {
                input: raw_input.to_string(),
            });
        }
        Ok(Some(name.to_string()))
    }

    /// # Personalize Response (`personalize`)
    ///
    /// Two independent random prefixes, applied in a fixed order:
    /// 1. If an interest is remembered, with probability 1/3 prefix
    ///    "As someone interested in {interest}, you might find this useful. "
    /// 2. If a preferred name is remembered, with probability 1/4 prefix
    ///    "{name}, "
    ///
    /// The name prefix is applied last, so when both fire the name leads.
    /// A roll is only drawn for a fact that is remembered.
    pub fn personalize<R: Rng + ?Sized>(&self, response: &str, rng: &mut R) -> String {
        let mut out = response.to_string();
        if let Some(interest) = self.interest() {
            if rng.gen_ratio(INTEREST_ODDS.0, INTEREST_ODDS.1) {
                out = format!("As someone interested in {interest}, you might find this useful. {out}");
            }
        }
        if let Some(name) = self.preferred_name() {
            if rng.gen_ratio(NAME_ODDS.0, NAME_ODDS.1) {
                out = format!("{name}, {out}");
            }
        }
        out
    }
}

/// Byte offset of the first case-insensitive match of an ASCII `needle`,
/// located on the original text so the offset is a valid char boundary.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn extracts_name_and_strips_trailing_punctuation() {
        assert_eq!(
            MemoryStore::extract_name_statement("my name is Alex!").unwrap(),
            Some("Alex".to_string())
        );
        assert_eq!(
            MemoryStore::extract_name_statement("Hi, My Name Is Mary Jane.").unwrap(),
            Some("Mary Jane".to_string())
        );
        assert_eq!(
            MemoryStore::extract_name_statement("my name is Bob, ").unwrap(),
            Some("Bob".to_string())
        );
    }

    #[test]
    fn name_phrase_is_case_insensitive_and_keeps_casing() {
        assert_eq!(
            MemoryStore::extract_name_statement("Hi! MY NAME IS McKenzie.").unwrap(),
            Some("McKenzie".to_string())
        );
    }

    #[test]
    fn name_offsets_survive_case_changing_characters() {
        // 'İ' grows and 'ẞ' shrinks when lowercased, so the total length is
        // unchanged while the phrase offset differs.
        assert_eq!(
            MemoryStore::extract_name_statement("İİ, my name is Ada ẞẞ").unwrap(),
            Some("Ada ẞẞ".to_string())
        );
        assert_eq!(
            MemoryStore::extract_name_statement("Ünal here, my name is Zoë!").unwrap(),
            Some("Zoë".to_string())
        );
    }

    #[test]
    fn name_without_letters_fails() {
        assert_eq!(
            MemoryStore::extract_name_statement("my name is 42"),
            Err(AdvisorError::NameExtractionFailed {
                input: "my name is 42".into()
            })
        );
        assert!(MemoryStore::extract_name_statement("my name is !!!").is_err());
        assert!(MemoryStore::extract_name_statement("my name is").is_err());
    }

    #[test]
    fn no_name_phrase_is_none() {
        assert_eq!(
            MemoryStore::extract_name_statement("what is a vpn").unwrap(),
            None
        );
    }

    #[test]
    fn interest_needs_phrase_and_topic() {
        let kb = KnowledgeBase::builtin();
        let topic = MemoryStore::extract_interest_statement("i'm interested in vpns", &kb).unwrap();
        assert_eq!(topic.key, "vpn");
        let topic =
            MemoryStore::extract_interest_statement("i would like to learn about scams", &kb)
                .unwrap();
        assert_eq!(topic.key, "phishing");

        assert!(MemoryStore::extract_interest_statement("tell me about vpns", &kb).is_none());
        assert!(MemoryStore::extract_interest_statement("i'm interested in cooking", &kb).is_none());
    }

    #[test]
    fn records_facts() {
        let mut memory = MemoryStore::new();
        memory.record_name("Sam");
        memory.record_preferred_name("Sammy");
        memory.record_interest("Phishing Prevention");

        assert_eq!(memory.get(NAME_KEY), Some("Sam"));
        assert_eq!(memory.preferred_name(), Some("Sammy"));
        assert_eq!(memory.interest(), Some("phishing prevention"));
        assert_eq!(memory.get("favourite_color"), None);
    }

    #[test]
    fn personalize_without_facts_is_identity() {
        let memory = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(memory.personalize("Base.", &mut rng), "Base.");
        }
    }

    #[test]
    fn personalize_applies_interest_before_name() {
        let mut memory = MemoryStore::new();
        memory.record_interest("VPN Usage");
        memory.record_preferred_name("Alex");
        let mut rng = StdRng::seed_from_u64(7);

        let outputs: Vec<String> = (0..400).map(|_| memory.personalize("Base.", &mut rng)).collect();

        let framing = "As someone interested in vpn usage, you might find this useful. ";
        assert!(outputs.iter().all(|o| o.ends_with("Base.")));
        assert!(outputs.iter().any(|o| o == "Base."));
        assert!(outputs.iter().any(|o| o.starts_with(framing)));
        assert!(outputs.iter().any(|o| o == &format!("Alex, {framing}Base.")));
        assert!(outputs.iter().all(|o| !o.starts_with(framing) || !o.contains("Alex")));
    }

    #[test]
    fn personalize_rates_are_roughly_one_in_three_and_one_in_four() {
        let mut memory = MemoryStore::new();
        memory.record_interest("Malware Protection");
        memory.record_preferred_name("Kim");
        let mut rng = StdRng::seed_from_u64(2024);

        let runs = 4000;
        let (mut interest_hits, mut name_hits) = (0, 0);
        for _ in 0..runs {
            let out = memory.personalize("x", &mut rng);
            if out.contains("interested in malware protection") {
                interest_hits += 1;
            }
            if out.starts_with("Kim, ") {
                name_hits += 1;
            }
        }
        let interest_rate = interest_hits as f64 / runs as f64;
        let name_rate = name_hits as f64 / runs as f64;
        assert!((interest_rate - 1.0 / 3.0).abs() < 0.05, "{interest_rate}");
        assert!((name_rate - 0.25).abs() < 0.05, "{name_rate}");
    }
}
