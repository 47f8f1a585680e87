//! Fetch command: read inbound messages and display them.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::NO_RESULT;
use crate::bridge::{self, Fetched};
use crate::config::Config;
use crate::format;
use crate::message::Message;
use crate::output::OutputControls;

/// Fetch up to `max_count` messages, print them, optionally save the
/// interchange form to `save` for a later `export --input`.
pub fn run(
    config: &Config,
    max_count: Option<usize>,
    save: Option<&Path>,
    output: &OutputControls,
) -> Result<()> {
    let fetched = bridge::fetch(&config.bridge(), max_count).context("Failed to fetch SMS list")?;

    let messages = match fetched {
        Fetched::Messages(messages) => messages,
        Fetched::Empty => {
            if output.json {
                output.print(&Vec::<Message>::new());
            } else {
                println!("{}", NO_RESULT);
            }
            return Ok(());
        }
    };

    if let Some(path) = save {
        let json = format::to_interchange(&messages)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to save messages to {:?}", path))?;
        tracing::info!(path = %path.display(), count = messages.len(), "saved interchange file");
    }

    if output.json {
        output.print(&messages);
    } else {
        print!("{}", format::to_display_text(&messages)?);
        println!("{}", "-".repeat(60));
        println!("{} messages", messages.len());
    }

    Ok(())
}
