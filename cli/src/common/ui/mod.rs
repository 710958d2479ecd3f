//! # CyberAdvisor UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal presentation for the chat session: the startup banner, colored
//! prompts and messages, and the character-by-character "typing" effect used
//! for advisor responses. Purely cosmetic; nothing here affects how a
//! response is chosen.
//!
//! ## Architecture
//!
//! `Console<W>` is generic over any `io::Write`, so the chat command renders
//! to stdout while tests render into a `Vec<u8>`. Colors come from the
//! `colored` crate and can be switched off per console (`--no-color`).
//!
use colored::{Color, Colorize};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const LOGO: &str = r"
   ____      _                  _       _       _
  / ___|   _| |__   ___ _ __   / \   __| |_   _(_)___  ___  _ __
 | |  | | | | '_ \ / _ \ '__| / _ \ / _` \ \ / / / __|/ _ \| '__|
 | |__| |_| | |_) |  __/ |   / ___ \ (_| |\ V /| \__ \ (_) | |
  \____\__, |_.__/ \___|_|  /_/   \_\__,_| \_/ |_|___/\___/|_|
       |___/
";

const WELCOME_BOX: &[&str] = &[
    "╔════════════════════════════════════════════════════════════════════╗",
    "║      Welcome to the Cybersecurity Awareness Advisor                ║",
    "║  Your personal guide to understanding digital security threats     ║",
    "╚════════════════════════════════════════════════════════════════════╝",
];

/// Rendering options for a [`Console`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOptions {
    pub color: bool,
    /// Per-character delay for the typing effect; `None` prints instantly.
    pub typing_delay: Option<Duration>,
    pub advisor_label: String,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            color: true,
            typing_delay: Some(Duration::from_millis(15)),
            advisor_label: "Advisor".to_string(),
        }
    }
}

/// Colored, optionally animated terminal output.
pub struct Console<W: Write> {
    out: W,
    options: ConsoleOptions,
}

impl Console<io::Stdout> {
    pub fn stdout(options: ConsoleOptions) -> Self {
        Self::new(io::stdout(), options)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, options: ConsoleOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.options.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Writes `text` one character at a time (when typing is enabled), then a newline.
    pub fn typed(&mut self, text: &str) -> io::Result<()> {
        self.type_out(text, None)
    }

    /// Each character is painted on its own, so escape codes are never split
    /// across the typing delay.
    fn type_out(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match self.options.typing_delay {
            Some(delay) if !delay.is_zero() => {
                let mut buf = [0u8; 4];
                for c in text.chars() {
                    let piece = c.encode_utf8(&mut buf);
                    match color {
                        Some(color) => {
                            let piece = self.paint(piece, color);
                            write!(self.out, "{piece}")?;
                        }
                        None => write!(self.out, "{piece}")?,
                    }
                    self.out.flush()?;
                    thread::sleep(delay);
                }
            }
            _ => match color {
                Some(color) => {
                    let body = self.paint(text, color);
                    self.out.write_all(body.as_bytes())?;
                }
                None => self.out.write_all(text.as_bytes())?,
            },
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// # Display Banner (`banner`)
    ///
    /// Logo, a short "Initializing system" animation (only when typing is
    /// enabled) and the welcome box.
    pub fn banner(&mut self) -> io::Result<()> {
        let logo = self.paint(LOGO, Color::Cyan);
        writeln!(self.out, "{logo}")?;
        if let Some(delay) = self.options.typing_delay.filter(|d| !d.is_zero()) {
            write!(self.out, "Initializing system")?;
            for _ in 0..6 {
                write!(self.out, ".")?;
                self.out.flush()?;
                thread::sleep(delay * 16);
            }
            writeln!(self.out, "\n")?;
        }
        for line in WELCOME_BOX {
            let line = self.paint(line, Color::Green);
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    /// Advisor response: label, then the typed text.
    pub fn bot_response(&mut self, text: &str) -> io::Result<()> {
        let label = format!("\n{}> ", self.options.advisor_label);
        let label = self.paint(&label, Color::Green);
        write!(self.out, "{label}")?;
        self.type_out(text, Some(Color::Green))
    }

    /// `name> ` without a trailing newline.
    pub fn user_prompt(&mut self, name: &str) -> io::Result<()> {
        let prompt = self.paint(&format!("{name}> "), Color::Cyan);
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, Color::Yellow);
        writeln!(self.out, "{text}")
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, Color::Red);
        writeln!(self.out, "{text}")
    }

    pub fn help_menu(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, Color::Magenta);
        writeln!(self.out, "\n{text}")
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_console() -> Console<Vec<u8>> {
        Console::new(
            Vec::new(),
            ConsoleOptions {
                color: false,
                typing_delay: None,
                advisor_label: "Advisor".into(),
            },
        )
    }

    fn output(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn bot_response_is_labelled() {
        let mut console = plain_console();
        console.bot_response("Use a password manager.").unwrap();
        assert_eq!(output(console), "\nAdvisor> Use a password manager.\n");
    }

    #[test]
    fn banner_without_typing_skips_animation() {
        let mut console = plain_console();
        console.banner().unwrap();
        let text = output(console);
        assert!(text.contains("Cybersecurity Awareness Advisor"));
        assert!(!text.contains("Initializing system"));
    }

    #[test]
    fn typing_effect_writes_every_character() {
        let mut console = Console::new(
            Vec::new(),
            ConsoleOptions {
                color: false,
                typing_delay: Some(Duration::from_millis(1)),
                advisor_label: "Guide".into(),
            },
        );
        console.typed("abc").unwrap();
        assert_eq!(output(console), "abc\n");
    }

    #[test]
    fn typed_color_wraps_each_character() {
        colored::control::set_override(true);
        let mut console = Console::new(
            Vec::new(),
            ConsoleOptions {
                color: true,
                typing_delay: Some(Duration::from_millis(1)),
                advisor_label: "Advisor".into(),
            },
        );
        console.bot_response("Hi").unwrap();
        let expected = format!("{}{}{}\n", "\nAdvisor> ".green(), "H".green(), "i".green());
        assert_eq!(output(console), expected);
    }

    #[test]
    fn prompts_and_warnings() {
        let mut console = plain_console();
        console.user_prompt("Ada").unwrap();
        console.warning("careful").unwrap();
        console.help_menu("Available Topics:").unwrap();
        assert_eq!(output(console), "Ada> careful\n\nAvailable Topics:\n");
    }

    #[test]
    fn color_disabled_emits_no_escape_codes() {
        let mut console = plain_console();
        console.error("boom").unwrap();
        assert!(!output(console).contains('\u{1b}'));
    }
}
