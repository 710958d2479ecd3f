//! # CyberAdvisor Response Resolver
//!
//! File: cli/src/advisor/resolver.rs
//!
//! ## Overview
//!
//! Turns one line of user input into one advisor response and updates the
//! session. Resolution is synchronous and deterministic for a given random
//! source, so tests inject a seeded `StdRng`.
//!
//! ## Resolution Order
//!
//! The first applicable step wins:
//!
//! 1. Validation: empty or over-long input becomes a warning. Nothing is counted.
//! 2. `exit` / `quit` / `bye` (exact): farewell plus session summary, session ends.
//! 3. `help` (exact): topic list. Not counted as a question.
//! 4. Memory intents: "what am i interested in", "what is my name",
//!    "my name is ...", "i'm interested in ...".
//! 5. Follow-up on the current topic ("more", "explain", "tell me", "details").
//! 6. Conversational intents: greetings, "how are you", purpose, capabilities.
//! 7. Topic keyword match; becomes the current topic.
//! 8. Fallback "unknown" response; the current topic is kept.
//!
//! Responses from steps 4-8 are then wrapped by sentiment modulation and
//! memory personalization, `questions_asked` is incremented and the matched
//! topic (if any) is recorded as viewed.
//!
//! ## Conversation States
//!
//! `Idle → AwaitingInput → Resolving → Responded → Idle`, with `Ended` reached
//! on an exit command. Resolving after `Ended` fails with
//! `AdvisorError::SessionEnded`.
//!
use super::knowledge_base::{
    self, KnowledgeBase, CAPABILITIES_REPLY, FAREWELLS, GREETINGS, HOW_ARE_YOU_REPLY,
    PURPOSE_REPLY, UNKNOWN_RESPONSES,
};
use super::memory::MemoryStore;
use super::sentiment::{Sentiment, SentimentDetector};
use super::session::{SessionState, SessionSummary};
use crate::core::error::{AdvisorError, InvalidInput};
use rand::Rng;
use tracing::{debug, trace};

pub const DEFAULT_MAX_INPUT_CHARS: usize = 200;

const EXIT_COMMANDS: &[&str] = &["exit", "quit", "bye"];
const HELP_COMMAND: &str = "help";
const FOLLOW_UP_CUES: &[&str] = &["more", "explain", "tell me", "details"];
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings"];
const INTEREST_QUESTIONS: &[&str] = &["what am i interested in", "what do i like"];
const NAME_QUESTIONS: &[&str] = &["what is my name", "what's my name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingInput,
    Resolving,
    Responded,
    Ended,
}

/// How the front end should present a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Input was rejected; show as a warning.
    Warning,
    /// Topic list for `help`.
    Help,
    Answer,
    /// Exit command; `Turn::summary` is set.
    Farewell,
}

/// The outcome of resolving one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub raw_input: String,
    pub normalized_input: String,
    pub kind: TurnKind,
    pub sentiment: Option<Sentiment>,
    /// Key of the topic this turn answered about.
    pub matched_topic: Option<String>,
    pub response: String,
    pub summary: Option<SessionSummary>,
}

/// Lowercased and trimmed.
pub fn normalize(raw_input: &str) -> String {
    raw_input.trim().to_lowercase()
}

/// Response text plus the topic it is about, before sentiment/personalization.
struct Answer {
    text: String,
    topic: Option<TopicRef>,
}

struct TopicRef {
    key: String,
    display_name: String,
}

impl Answer {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            topic: None,
        }
    }
}

/// # Response Resolver (`ResponseResolver`)
///
/// Owns one session: its state, the knowledge base it answers from and the
/// random source used for variant selection and personalization.
pub struct ResponseResolver<R: Rng> {
    kb: KnowledgeBase,
    detector: SentimentDetector,
    session: SessionState,
    rng: R,
    max_input_chars: usize,
    state: ConversationState,
}

impl<R: Rng> ResponseResolver<R> {
    pub fn new(kb: KnowledgeBase, session: SessionState, rng: R) -> Self {
        Self {
            kb,
            detector: SentimentDetector::new(),
            session,
            rng,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            state: ConversationState::Idle,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == ConversationState::Ended
    }

    fn transition(&mut self, to: ConversationState) {
        if self.state != to {
            trace!("Conversation state {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }

    /// Marks the resolver as waiting for the next line.
    pub fn await_input(&mut self) -> Result<(), AdvisorError> {
        match self.state {
            ConversationState::Ended => Err(AdvisorError::SessionEnded),
            ConversationState::Responded => {
                self.transition(ConversationState::Idle);
                self.transition(ConversationState::AwaitingInput);
                Ok(())
            }
            _ => {
                self.transition(ConversationState::AwaitingInput);
                Ok(())
            }
        }
    }

    /// # Resolve Input (`resolve`)
    ///
    /// Resolves one line of raw user input into a [`Turn`].
    ///
    /// ## Errors
    ///
    /// Only `AdvisorError::SessionEnded`, when called after an exit command.
    /// Invalid input is reported as a `TurnKind::Warning` turn instead.
    pub fn resolve(&mut self, raw_input: &str) -> Result<Turn, AdvisorError> {
        if self.is_ended() {
            return Err(AdvisorError::SessionEnded);
        }
        self.transition(ConversationState::Resolving);
        let normalized = normalize(raw_input);

        let turn = if let Err(invalid) = self.validate(&normalized) {
            debug!("Rejected input: {:?}", invalid);
            self.turn(raw_input, &normalized, TurnKind::Warning, invalid.to_string())
        } else if EXIT_COMMANDS.contains(&normalized.as_str()) {
            return Ok(self.finish(raw_input, &normalized));
        } else if normalized == HELP_COMMAND {
            let help = self.help_text();
            self.turn(raw_input, &normalized, TurnKind::Help, help)
        } else {
            self.answer_turn(raw_input, &normalized)
        };

        self.transition(ConversationState::Responded);
        Ok(turn)
    }

    /// Ends the session as if the user typed an exit command (used on EOF).
    pub fn end(&mut self) -> Result<Turn, AdvisorError> {
        if self.is_ended() {
            return Err(AdvisorError::SessionEnded);
        }
        Ok(self.finish("", ""))
    }

    /// Topic display names followed by usage hints.
    pub fn help_text(&self) -> String {
        let mut text = String::from("Available Topics:");
        for topic in self.kb.topics() {
            text.push_str("\n• ");
            text.push_str(&topic.display_name);
        }
        text.push_str("\n\nType a topic name or use a related keyword to learn more.");
        text.push_str("\nType 'exit', 'quit', or 'bye' to end the session.");
        text
    }

    fn validate(&self, normalized: &str) -> Result<(), InvalidInput> {
        if normalized.is_empty() {
            return Err(InvalidInput::Empty);
        }
        let len = normalized.chars().count();
        if len > self.max_input_chars {
            return Err(InvalidInput::TooLong {
                len,
                max: self.max_input_chars,
            });
        }
        Ok(())
    }

    fn turn(&self, raw: &str, normalized: &str, kind: TurnKind, response: String) -> Turn {
        Turn {
            raw_input: raw.to_string(),
            normalized_input: normalized.to_string(),
            kind,
            sentiment: None,
            matched_topic: None,
            response,
            summary: None,
        }
    }

    fn finish(&mut self, raw: &str, normalized: &str) -> Turn {
        let farewell = knowledge_base::pick(FAREWELLS, &mut self.rng).to_string();
        let summary = self.session.summary();
        debug!(
            "Session for {} ended after {} questions",
            self.session.user_name, self.session.questions_asked
        );
        self.transition(ConversationState::Ended);
        Turn {
            summary: Some(summary),
            ..self.turn(raw, normalized, TurnKind::Farewell, farewell)
        }
    }

    fn answer_turn(&mut self, raw: &str, normalized: &str) -> Turn {
        let answer = self.answer(raw, normalized);

        let sentiment = self.detector.detect(normalized);
        let mut response = match sentiment {
            Some(tag) => {
                debug!("Detected sentiment: {}", tag);
                self.detector.modulate(&answer.text, tag, raw)
            }
            None => answer.text,
        };
        response = self.session.memory.personalize(&response, &mut self.rng);

        self.session.questions_asked += 1;
        let matched_topic = answer.topic.map(|topic| {
            self.session.mark_topic_viewed(&topic.display_name);
            topic.key
        });

        Turn {
            sentiment,
            matched_topic,
            ..self.turn(raw, normalized, TurnKind::Answer, response)
        }
    }

    /// Steps 4-8 of the resolution order.
    fn answer(&mut self, raw: &str, normalized: &str) -> Answer {
        if let Some(answer) = self.memory_intent(raw, normalized) {
            return answer;
        }
        if let Some(answer) = self.follow_up(normalized) {
            return answer;
        }
        if let Some(text) = self.conversational_intent(normalized) {
            debug!("Matched conversational intent");
            return Answer::plain(text);
        }

        if let Some(topic) = self.kb.find_by_keyword(normalized) {
            debug!("Matched topic '{}'", topic.key);
            self.session.current_topic = Some(topic.key.clone());

            let interest = topic.display_name.to_lowercase();
            let mut text = String::new();
            if self.session.memory.interest() == Some(interest.as_str()) {
                text.push_str(&format!(
                    "Since you mentioned you're interested in {interest}, here's some helpful information: "
                ));
            }
            text.push_str(&self.kb.format_full_response(topic, topic.primary_response()));
            return Answer {
                text,
                topic: Some(TopicRef {
                    key: topic.key.clone(),
                    display_name: topic.display_name.clone(),
                }),
            };
        }

        debug!("No match for input, using fallback response");
        Answer::plain(knowledge_base::pick(UNKNOWN_RESPONSES, &mut self.rng))
    }

    fn memory_intent(&mut self, raw: &str, normalized: &str) -> Option<Answer> {
        if INTEREST_QUESTIONS.iter().any(|q| normalized.contains(q)) {
            let text = match self.session.memory.interest() {
                Some(interest) => format!(
                    "You previously mentioned that you're interested in {interest}. Would you like to learn more about it?"
                ),
                None => "I don't know your interests yet. Tell me something like \"I'm interested in phishing\" and I'll remember it.".to_string(),
            };
            return Some(Answer::plain(text));
        }

        if NAME_QUESTIONS.iter().any(|q| normalized.contains(q)) {
            let name = self
                .session
                .memory
                .preferred_name()
                .unwrap_or(&self.session.user_name);
            return Some(Answer::plain(format!("Your name is {name}.")));
        }

        match MemoryStore::extract_name_statement(raw.trim()) {
            Ok(Some(name)) => {
                debug!("Remembering preferred name '{}'", name);
                self.session.memory.record_preferred_name(&name);
                return Some(Answer::plain(format!(
                    "Nice to meet you, {name}! I'll remember that."
                )));
            }
            Err(e) => {
                debug!("{}", e);
                return Some(Answer::plain(
                    "I didn't quite catch your name. Could you tell me again, for example \"My name is Alex\"?",
                ));
            }
            Ok(None) => {}
        }

        if let Some(topic) = MemoryStore::extract_interest_statement(normalized, &self.kb) {
            debug!("Remembering interest in '{}'", topic.key);
            self.session.memory.record_interest(&topic.display_name);
            return Some(Answer::plain(format!(
                "Great! I'll remember that you're interested in {}. It's an important aspect of cybersecurity.",
                topic.display_name.to_lowercase()
            )));
        }
        None
    }

    fn follow_up(&mut self, normalized: &str) -> Option<Answer> {
        let current = self.session.current_topic.as_deref()?;
        if !FOLLOW_UP_CUES.iter().any(|cue| normalized.contains(cue)) {
            return None;
        }
        let topic = self.kb.lookup(current).ok()?;
        debug!("Follow-up on topic '{}'", topic.key);
        let variant = self.kb.pick_response_variant(topic, &mut self.rng);
        Some(Answer {
            text: self.kb.format_full_response(topic, variant),
            topic: Some(TopicRef {
                key: topic.key.clone(),
                display_name: topic.display_name.clone(),
            }),
        })
    }

    fn conversational_intent(&mut self, normalized: &str) -> Option<String> {
        let is_greeting = normalized
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| GREETING_WORDS.contains(&word));
        if is_greeting {
            return Some(knowledge_base::pick(GREETINGS, &mut self.rng).to_string());
        }
        if normalized.contains("how are you") {
            return Some(HOW_ARE_YOU_REPLY.to_string());
        }
        if normalized.contains("what is your purpose") || normalized.contains("what do you do") {
            return Some(PURPOSE_REPLY.to_string());
        }
        if normalized.contains("what can i ask you") || normalized.contains("what can you do") {
            return Some(CAPABILITIES_REPLY.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn resolver() -> ResponseResolver<StdRng> {
        ResponseResolver::new(
            KnowledgeBase::builtin(),
            SessionState::new("Tester"),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn state_machine_cycles_until_exit() {
        let mut r = resolver();
        assert_eq!(r.state(), ConversationState::Idle);
        r.await_input().unwrap();
        assert_eq!(r.state(), ConversationState::AwaitingInput);
        r.resolve("vpn").unwrap();
        assert_eq!(r.state(), ConversationState::Responded);
        r.await_input().unwrap();
        assert_eq!(r.state(), ConversationState::AwaitingInput);

        let turn = r.resolve("bye").unwrap();
        assert_eq!(turn.kind, TurnKind::Farewell);
        assert_eq!(r.state(), ConversationState::Ended);
        assert_eq!(r.resolve("vpn"), Err(AdvisorError::SessionEnded));
        assert_eq!(r.await_input(), Err(AdvisorError::SessionEnded));
        assert_eq!(r.end(), Err(AdvisorError::SessionEnded));
    }

    #[test]
    fn empty_input_warns_without_counting() {
        let mut r = resolver();
        let turn = r.resolve("   ").unwrap();
        assert_eq!(turn.kind, TurnKind::Warning);
        assert_eq!(turn.response, InvalidInput::Empty.to_string());
        assert_eq!(r.session().questions_asked, 0);
    }

    #[test]
    fn input_cap_is_configurable() {
        let mut r = resolver().with_max_input_chars(10);
        let turn = r.resolve("tell me about vpn").unwrap();
        assert_eq!(turn.kind, TurnKind::Warning);
        assert!(turn.response.contains("too long (17 characters)"));
        assert_eq!(r.resolve("vpn").unwrap().kind, TurnKind::Answer);
    }

    #[test]
    fn help_is_not_a_question() {
        let mut r = resolver();
        let turn = r.resolve("HELP").unwrap();
        assert_eq!(turn.kind, TurnKind::Help);
        for topic in KnowledgeBase::builtin().topics() {
            assert!(turn.response.contains(&format!("• {}", topic.display_name)));
        }
        assert_eq!(r.session().questions_asked, 0);
    }

    #[test]
    fn greeting_words_do_not_swallow_keywords() {
        // "phishing" contains "hi" but is not the word "hi".
        let mut r = resolver();
        let turn = r.resolve("phishing").unwrap();
        assert_eq!(turn.matched_topic.as_deref(), Some("phishing"));

        let turn = r.resolve("Hi there").unwrap();
        assert!(GREETINGS.contains(&turn.response.as_str()));
        assert_eq!(turn.matched_topic, None);
        assert_eq!(r.session().current_topic.as_deref(), Some("phishing"));
    }

    #[test]
    fn end_produces_summary() {
        let mut r = resolver();
        r.resolve("what is a vpn").unwrap();
        let turn = r.end().unwrap();
        assert_eq!(turn.kind, TurnKind::Farewell);
        let summary = turn.summary.unwrap();
        assert_eq!(summary.questions_asked, 1);
        assert_eq!(summary.topics_viewed, vec!["VPN Usage"]);
    }

    #[test]
    fn name_question_prefers_preferred_name() {
        let mut r = resolver();
        assert_eq!(r.resolve("what is my name?").unwrap().response, "Your name is Tester.");
        r.resolve("my name is Sam").unwrap();
        assert!(r.resolve("what's my name").unwrap().response.ends_with("Your name is Sam."));
    }
}
