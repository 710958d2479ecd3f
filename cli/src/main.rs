//! # CyberAdvisor Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `cyberadvisor` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers in the library crate
//!
//! ## Examples
//!
//! ```bash
//! # Start an interactive session
//! cyberadvisor
//!
//! # Same, with debug logging on stderr
//! cyberadvisor -vv chat --name Ada
//!
//! # One-shot question
//! cyberadvisor ask "how do I make a strong password?"
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler (`chat` when no command is given)
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use cyberadvisor::commands;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "cyberadvisor",
    about = "CyberAdvisor: a terminal cybersecurity awareness chatbot",
    long_about = "Chat with a cybersecurity advisor about passwords, phishing, malware, privacy and more.\n\
                  Runs an interactive session by default.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive session (default).
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Resolve a single message and print the response.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// List the topics the advisor knows about.
    #[command(alias = "t")]
    Topics(commands::topics::TopicsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        None => commands::chat::handle_chat(Default::default()),
        Some(Commands::Chat(args)) => commands::chat::handle_chat(args),
        Some(Commands::Ask(args)) => commands::ask::handle_ask(args),
        Some(Commands::Topics(args)) => commands::topics::handle_topics(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
