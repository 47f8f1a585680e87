//! Export command: CSV from the device, or from a saved interchange file.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::{batch, NO_RESULT};
use crate::config::Config;
use crate::export::{self, Exported};

pub fn run(config: &Config, input: Option<&Path>) -> Result<()> {
    let Some(input) = input else {
        return batch::run(config);
    };

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read interchange file {:?}", input))?;

    match export::export_interchange(&text, &config.default_filename, &config.output_dir)
        .context("Failed to export SMS list")?
    {
        Exported::Written { path, count } => {
            println!("Exported {} messages to {}", count, path.display());
        }
        Exported::Empty => println!("{}", NO_RESULT),
    }

    Ok(())
}
