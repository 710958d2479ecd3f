//! # CyberAdvisor Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! Resolves a single line in a fresh session and prints the response, without
//! banner, prompts or typing effect. Handy for scripting and for checking how a
//! phrase is interpreted.
//!
//! ```bash
//! cyberadvisor ask "I'm worried about phishing"
//! cyberadvisor ask --seed 1 --name Ada tell me about vpns
//! ```
//!
//! Input rejected by validation (empty or too long) is written to stderr, and
//! the command still exits successfully.
//!
use crate::advisor::{Turn, TurnKind};
use crate::commands::chat::build_resolver;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The message to resolve. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Seed for the random source, for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name used for the one-off session.
    #[arg(long, short, default_value = "Guest")]
    pub name: String,
}

/// # Handle Ask Command (`handle_ask`)
///
/// ## Errors
///
/// Returns an error if configuration loading fails or output cannot be written.
pub fn handle_ask(args: AskArgs) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);
    let config = config::load_config()?;
    let seed = args.seed.or(config.chat.seed);
    let message = args.text.join(" ");

    let mut resolver = build_resolver(&args.name, seed, config.chat.max_input_chars);
    let turn = resolver.resolve(&message)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    render(&turn, &mut stdout.lock(), &mut stderr.lock()).context("Failed to write response")
}

/// Writes a turn's response to `out`, or to `err` when the input was rejected.
pub fn render<O: Write, E: Write>(turn: &Turn, out: &mut O, err: &mut E) -> io::Result<()> {
    match turn.kind {
        TurnKind::Warning => writeln!(err, "{}", turn.response),
        TurnKind::Help | TurnKind::Answer => writeln!(out, "{}", turn.response),
        TurnKind::Farewell => {
            writeln!(out, "{}", turn.response)?;
            if let Some(summary) = &turn.summary {
                writeln!(out, "\n{summary}")?;
            }
            Ok(())
        }
    }
}
