//! sms-export - export received SMS from an Android device to CSV
//!
//! With no subcommand, fetches every inbound message over adb and writes
//! `<YYYYMMDD_HHMMSS>.csv` named after the newest one.
//!
//! CHANGELOG:
//! - 04/02/2026 - Logging setup moved to `logging::init`
//! - 02/02/2026 - Initial CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use sms_export::commands;
use sms_export::config::{Config, MAX_COUNT_LIMIT};
use sms_export::{logging, output};

/// Export received SMS from an Android device (via adb) to CSV.
#[derive(Parser, Debug)]
#[command(name = "sms-export")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the adb executable [env: SMS_EXPORT_ADB]
    #[arg(long, global = true)]
    adb: Option<String>,

    /// Device serial to query [env: ANDROID_SERIAL]
    #[arg(short, long, global = true)]
    serial: Option<String>,

    /// Directory for the CSV file [env: SMS_EXPORT_DIR]
    #[arg(short, long, global = true)]
    output_dir: Option<String>,

    /// File name used when there are no messages to name the file after
    #[arg(long, global = true)]
    default_filename: Option<String>,

    /// Output as JSON (fetch command)
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Truncate text fields to this length
    #[arg(long, global = true)]
    max_text_chars: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all inbound messages and export them to CSV (default)
    Run,

    /// Fetch inbound messages and display them
    Fetch {
        /// Max messages to fetch (0-10000)
        #[arg(short = 'n', long, value_parser = parse_max_count)]
        max_count: Option<usize>,

        /// Also save the fetched messages as JSON for a later `export --input`
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Export messages to CSV
    Export {
        /// JSON file written by `fetch --save`; queries the device when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn parse_max_count(value: &str) -> Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if n > MAX_COUNT_LIMIT {
        return Err(format!("must be between 0 and {}", MAX_COUNT_LIMIT));
    }
    Ok(n)
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    logging::init();

    let cli = Cli::parse();

    let config = Config::from_env().with_overrides(
        cli.adb.clone(),
        cli.serial.clone(),
        cli.output_dir.clone(),
        cli.default_filename.clone(),
    );

    let output_controls = output::OutputControls {
        json: cli.json,
        compact: cli.compact,
        max_text_chars: cli.max_text_chars,
    };

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => commands::batch::run(&config),
        Command::Fetch { max_count, save } => {
            commands::fetch::run(&config, max_count, save.as_deref(), &output_controls)
        }
        Command::Export { input } => commands::export::run(&config, input.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if cli.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}
