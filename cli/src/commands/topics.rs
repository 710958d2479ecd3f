//! # CyberAdvisor Topics Command
//!
//! File: cli/src/commands/topics.rs
//!
//! Lists the built-in knowledge base topics in matching order, optionally with
//! the keywords that select each one.
//!
use crate::advisor::KnowledgeBase;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

/// # Topics Command Arguments (`TopicsArgs`)
#[derive(Parser, Debug, Clone, Default)]
pub struct TopicsArgs {
    /// Also list the keywords that match each topic.
    #[arg(long, short)]
    pub keywords: bool,
}

pub fn handle_topics(args: TopicsArgs) -> Result<()> {
    info!("Handling topics command with args: {:?}", args);
    let kb = KnowledgeBase::builtin();
    let stdout = io::stdout();
    write_topics(&kb, args.keywords, &mut stdout.lock()).context("Failed to write topic list")
}

pub fn write_topics<W: Write>(kb: &KnowledgeBase, keywords: bool, out: &mut W) -> io::Result<()> {
    writeln!(out, "Available Topics:")?;
    for topic in kb.topics() {
        writeln!(out, "• {} ({})", topic.display_name, topic.key)?;
        if keywords {
            writeln!(out, "    keywords: {}", topic.keywords.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(keywords: bool) -> String {
        let mut out = Vec::new();
        write_topics(&KnowledgeBase::builtin(), keywords, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_every_topic_in_order() {
        let text = listing(false);
        assert!(text.starts_with("Available Topics:\n• Password Safety (password)\n"));
        assert_eq!(text.lines().count(), 1 + KnowledgeBase::builtin().len());
        assert!(!text.contains("keywords:"));
    }

    #[test]
    fn keywords_flag_adds_keyword_lines() {
        let text = listing(true);
        assert!(text.contains("    keywords: "));
        assert!(text.contains("passphrase") || text.contains("passwords"));
    }
}
