//! Batch command: fetch everything, export once, print a summary.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use anyhow::{Context, Result};

use super::NO_RESULT;
use crate::bridge::{self, Bridge, Fetched};
use crate::config::Config;
use crate::export::{self, Exported};

/// Run fetch → export with no count cap.
pub fn run(config: &Config) -> Result<()> {
    run_with(&config.bridge(), config)
}

/// Same as [`run`], against any bridge.
pub fn run_with(bridge: &dyn Bridge, config: &Config) -> Result<()> {
    let messages = match bridge::fetch(bridge, None) {
        Ok(Fetched::Messages(messages)) => messages,
        Ok(Fetched::Empty) => {
            println!("{}", NO_RESULT);
            return Ok(());
        }
        Err(e) => {
            println!("{}", NO_RESULT);
            return Err(e).context("Failed to fetch SMS list");
        }
    };

    match export::export(messages, &config.default_filename, &config.output_dir)
        .context("Failed to export SMS list")?
    {
        Exported::Written { path, count } => {
            println!("Exported {} messages to {}", count, path.display());
        }
        Exported::Empty => println!("{}", NO_RESULT),
    }

    Ok(())
}
