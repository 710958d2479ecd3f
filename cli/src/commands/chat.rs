//! # CyberAdvisor Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! The interactive session: banner and welcome cue, name prompt, then a
//! read-resolve-render loop until the user types `exit`, `quit` or `bye` (or
//! stdin closes), followed by the farewell and session summary.
//!
//! ## Examples
//!
//! ```bash
//! # Start a session (chat is also the default command)
//! cyberadvisor chat
//!
//! # Skip the name prompt and animations, with reproducible responses
//! cyberadvisor chat --name Ada --no-typing --no-audio --seed 7
//! ```
//!
use crate::advisor::{KnowledgeBase, ResponseResolver, SessionState, SessionSummary, TurnKind};
use crate::common::audio::{self, AudioCue};
use crate::common::ui::{Console, ConsoleOptions};
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};

const CLOSING_LINE: &str = "\nStay safe online and remember to practice good cybersecurity habits!";

/// # Chat Command Arguments (`ChatArgs`)
///
/// Flags override the matching configuration file settings for this session.
#[derive(Parser, Debug, Default, Clone)]
pub struct ChatArgs {
    /// Your name. Skips the name prompt.
    #[arg(long, short)]
    pub name: Option<String>,

    /// Seed for the random source, for reproducible conversations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print responses instantly instead of with the typing effect.
    #[arg(long)]
    pub no_typing: bool,

    /// Do not play audio cues.
    #[arg(long)]
    pub no_audio: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Effective settings for one session after merging config and flags.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub name: Option<String>,
    pub seed: Option<u64>,
    pub max_input_chars: usize,
    pub banner: bool,
    pub console: ConsoleOptions,
}

impl ChatSettings {
    pub fn from_config(config: &Config, args: &ChatArgs) -> Self {
        let typing = config.display.typing_effect && !args.no_typing;
        Self {
            name: args.name.clone(),
            seed: args.seed.or(config.chat.seed),
            max_input_chars: config.chat.max_input_chars,
            banner: config.display.banner,
            console: ConsoleOptions {
                color: config.display.color && !args.no_color,
                typing_delay: typing.then(|| Duration::from_millis(config.display.typing_delay_ms)),
                advisor_label: config.chat.advisor_label.clone(),
            },
        }
    }
}

/// Seeded when a seed is given, otherwise from OS entropy.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Seeding random source with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Builds a resolver for a new session of `user_name`.
pub fn build_resolver(
    user_name: &str,
    seed: Option<u64>,
    max_input_chars: usize,
) -> ResponseResolver<StdRng> {
    ResponseResolver::new(
        KnowledgeBase::builtin(),
        SessionState::new(user_name),
        session_rng(seed),
    )
    .with_max_input_chars(max_input_chars)
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads configuration, applies the command-line overrides and runs the
/// session on stdin/stdout.
///
/// ## Errors
///
/// Returns an error if configuration loading fails or the terminal cannot be
/// read from or written to.
pub fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let mut config = config::load_config()?;
    if args.no_audio {
        config.audio.enabled = false;
    }
    let settings = ChatSettings::from_config(&config, &args);
    let player = audio::from_config(&config.audio);

    let stdin = io::stdin();
    let mut console = Console::stdout(settings.console.clone());
    let summary = run_chat(stdin.lock(), &mut console, player.as_ref(), &settings)?;
    if let Some(summary) = summary {
        debug!("Session finished: {:?}", summary);
    }
    Ok(())
}

/// # Run Chat Session (`run_chat`)
///
/// The session loop, independent of the real terminal.
///
/// ## Returns
///
/// * `Ok(Some(summary))` - the session ended normally.
/// * `Ok(None)` - input closed before a name was entered.
pub fn run_chat<R: BufRead, W: Write>(
    mut input: R,
    console: &mut Console<W>,
    player: &dyn AudioCue,
    settings: &ChatSettings,
) -> Result<Option<SessionSummary>> {
    if settings.banner {
        console.banner().context("Failed to write banner")?;
    }
    player.play("welcome");

    let user_name = match settings.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => match prompt_for_name(&mut input, console)? {
            Some(name) => name,
            None => return Ok(None),
        },
    };

    player.play("introduction");
    console.typed(&format!(
        "\nNice to meet you, {user_name}! I'm your cybersecurity advisor."
    ))?;
    console.typed("You can ask me about various cybersecurity topics or type 'help' to see all available topics.")?;
    console.typed("Type 'exit', 'quit', or 'bye' when you're ready to end our session.")?;

    let mut resolver = build_resolver(&user_name, settings.seed, settings.max_input_chars);
    loop {
        resolver.await_input()?;
        console.user_prompt(&user_name)?;

        let turn = match read_input_line(&mut input)? {
            Some(line) => resolver.resolve(&line)?,
            None => {
                debug!("Input closed, ending session");
                console.line("")?;
                resolver.end()?
            }
        };

        match turn.kind {
            TurnKind::Warning => console.warning(&turn.response)?,
            TurnKind::Help => console.help_menu(&turn.response)?,
            TurnKind::Answer => {
                console.bot_response(&turn.response)?;
                console.line("")?;
            }
            TurnKind::Farewell => {
                console.bot_response(&turn.response)?;
                let summary = turn.summary.unwrap_or_else(|| resolver.session().summary());
                console.typed(&summary.to_string())?;
                console.typed(CLOSING_LINE)?;
                return Ok(Some(summary));
            }
        }
    }
}

fn prompt_for_name<R: BufRead, W: Write>(
    input: &mut R,
    console: &mut Console<W>,
) -> Result<Option<String>> {
    loop {
        console.prompt("\nBefore we begin, please enter your name: ")?;
        let Some(line) = read_input_line(input)? else {
            return Ok(None);
        };
        let name = line.trim();
        if !name.is_empty() {
            return Ok(Some(name.to_string()));
        }
        console.error("Name cannot be empty. Please try again.")?;
    }
}

/// Reads one line, or `None` at end of input. Bytes that are not valid UTF-8
/// are replaced with U+FFFD so the line is still resolved.
fn read_input_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = input
        .read_until(b'\n', &mut buf)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
