//! # CyberAdvisor Conversation Engine
//!
//! File: cli/src/advisor/mod.rs
//!
//! ## Overview
//!
//! The response-resolution engine, independent of any terminal I/O:
//!
//! - `knowledge_base`: Topics, keyword matching and canned response pools
//! - `sentiment`: Sentiment tags and response wrapping
//! - `memory`: Per-session remembered facts (name, interest)
//! - `session`: Session counters, viewed topics and the exit summary
//! - `resolver`: The per-turn state machine tying the above together
//!
//! ## Usage
//!
//! ```rust
//! use cyberadvisor::advisor::{KnowledgeBase, ResponseResolver, SessionState};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut resolver = ResponseResolver::new(
//!     KnowledgeBase::builtin(),
//!     SessionState::new("Ada"),
//!     StdRng::seed_from_u64(1),
//! );
//! let turn = resolver.resolve("How do I make a strong password?").unwrap();
//! assert_eq!(turn.matched_topic.as_deref(), Some("password"));
//! ```
//!
pub mod knowledge_base;
pub mod memory;
pub mod resolver;
pub mod sentiment;
pub mod session;

pub use knowledge_base::{KnowledgeBase, Topic};
pub use memory::MemoryStore;
pub use resolver::{ConversationState, ResponseResolver, Turn, TurnKind};
pub use sentiment::{Sentiment, SentimentDetector};
pub use session::{SessionState, SessionSummary};
