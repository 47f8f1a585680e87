//! sms-export-shell - interactive fetch/display/export session.
//!
//! CHANGELOG:
//! - 04/02/2026 - Logging setup moved to `logging::init`
//! - 02/02/2026 - Initial implementation

use anyhow::Result;
use clap::Parser;
use std::io;

use sms_export::config::{Config, MAX_COUNT_LIMIT};
use sms_export::{logging, shell};

#[derive(Parser)]
#[command(name = "sms-export-shell")]
#[command(about = "Interactive session for fetching and exporting SMS over adb")]
struct Cli {
    /// Path to the adb executable [env: SMS_EXPORT_ADB]
    #[arg(long)]
    adb: Option<String>,

    /// Device serial to query [env: ANDROID_SERIAL]
    #[arg(short, long)]
    serial: Option<String>,

    /// Directory for exported CSV files [env: SMS_EXPORT_DIR]
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Initial max count (0-10000)
    #[arg(short = 'n', long, default_value_t = 1000,
          value_parser = clap::value_parser!(u16).range(0..=MAX_COUNT_LIMIT as i64))]
    max_count: u16,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let mut config = Config::from_env().with_overrides(cli.adb, cli.serial, cli.output_dir, None);
    config.max_count = usize::from(cli.max_count);

    let bridge = config.bridge();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell::run(stdin.lock(), &mut stdout, &bridge, &config)?;

    Ok(())
}
