//! # CyberAdvisor Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the CLI. Each module defines its clap argument
//! struct and a `handle_*` function that `main.rs` routes to.
//!
//! - `chat`: Interactive advisor session (the default command)
//! - `ask`: Resolve one message and print the response
//! - `topics`: List the knowledge base topics
//!

/// Interactive session loop, plus the resolver/RNG construction shared with `ask`.
pub mod chat;
/// One-shot resolution of a single message.
pub mod ask;
/// Topic listing.
pub mod topics;
