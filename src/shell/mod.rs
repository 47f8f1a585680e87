//! Interactive session: set a max count, fetch & display, export.
//!
//! Reads one command per line and writes results to the output stream. A
//! failing action is reported and the session continues.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

pub mod session;

use std::io::{self, BufRead, Write};

use crate::bridge::Bridge;
use crate::config::Config;
use session::{Action, Reply, Session};

pub const PROMPT: &str = "sms> ";

pub const HELP: &str = "\
Commands:
  count <n>   set max messages to fetch (0-10000)
  fetch       fetch and display inbound messages
  show        display the last fetched messages again
  export      export the last fetched messages to CSV
  help        show this help
  quit        leave the session";

/// Run the read-eval-print loop until `quit` or end of input.
pub fn run<R, W>(input: R, out: &mut W, bridge: &dyn Bridge, config: &Config) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new(config.max_count);
    writeln!(out, "max count: {} (type `help` for commands)", session.max_count())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;

        let action = match Action::parse(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        match session.handle(action, bridge, config) {
            Reply::Text(text) => write!(out, "{}", text)?,
            Reply::Notice(text) => writeln!(out, "{}", text)?,
            Reply::Error(e) => {
                tracing::debug!(error = %e, "action failed");
                writeln!(out, "Error: {}", e)?;
            }
            Reply::Quit => return Ok(()),
        }
    }
}
