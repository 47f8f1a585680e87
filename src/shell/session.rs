//! Session state and action handlers for the interactive shell.
//!
//! CHANGELOG:
//! - 04/02/2026 - Reject trailing words after `count <n>`
//! - 02/02/2026 - Initial implementation

use crate::bridge::{self, Bridge, Fetched};
use crate::commands::NO_RESULT;
use crate::config::{Config, MAX_COUNT_LIMIT};
use crate::error::ExportError;
use crate::export::{self, Exported};
use crate::format;
use crate::message::Message;

use super::HELP;

/// One user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetCount(usize),
    Fetch,
    Show,
    Export,
    Help,
    Quit,
}

impl Action {
    /// Parse a command line; blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };

        let action = match command.to_lowercase().as_str() {
            "count" => {
                let value = words.next().ok_or("usage: count <n>")?;
                if words.next().is_some() {
                    return Err("usage: count <n>".to_string());
                }
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("not a number: {}", value))?;
                if n > MAX_COUNT_LIMIT {
                    return Err(format!("max count must be between 0 and {}", MAX_COUNT_LIMIT));
                }
                Action::SetCount(n)
            }
            "fetch" => Action::Fetch,
            "show" => Action::Show,
            "export" => Action::Export,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => return Err(format!("unknown command: {} (try `help`)", other)),
        };
        Ok(Some(action))
    }
}

/// What the shell should show for a handled action.
#[derive(Debug)]
pub enum Reply {
    /// Newline-terminated block (message listing).
    Text(String),
    /// Single status line.
    Notice(String),
    Error(ExportError),
    Quit,
}

/// State carried between actions: the cap and the last fetched messages.
#[derive(Debug, Clone, Default)]
pub struct Session {
    max_count: usize,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(max_count: usize) -> Self {
        Self {
            max_count: max_count.min(MAX_COUNT_LIMIT),
            messages: Vec::new(),
        }
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn handle(&mut self, action: Action, bridge: &dyn Bridge, config: &Config) -> Reply {
        match action {
            Action::SetCount(n) => {
                self.max_count = n;
                Reply::Notice(format!("max count: {}", n))
            }
            Action::Fetch => self.fetch(bridge),
            Action::Show => self.show(),
            Action::Export => self.export(config),
            Action::Help => Reply::Notice(HELP.to_string()),
            Action::Quit => Reply::Quit,
        }
    }

    /// Fetch up to `max_count` messages and display them. A failed fetch
    /// keeps the previously fetched messages.
    fn fetch(&mut self, bridge: &dyn Bridge) -> Reply {
        match bridge::fetch(bridge, Some(self.max_count)) {
            Ok(Fetched::Messages(messages)) => {
                self.messages = messages;
                self.show()
            }
            Ok(Fetched::Empty) => {
                self.messages.clear();
                Reply::Notice(NO_RESULT.to_string())
            }
            Err(e) => Reply::Error(e),
        }
    }

    fn show(&self) -> Reply {
        if self.messages.is_empty() {
            return Reply::Notice(NO_RESULT.to_string());
        }
        match format::to_display_text(&self.messages) {
            Ok(text) => Reply::Text(text),
            Err(e) => Reply::Error(e),
        }
    }

    fn export(&self, config: &Config) -> Reply {
        match export::export(
            self.messages.clone(),
            &config.default_filename,
            &config.output_dir,
        ) {
            Ok(Exported::Written { path, count }) => {
                Reply::Notice(format!("Exported {} messages to {}", count, path.display()))
            }
            Ok(Exported::Empty) => Reply::Notice(NO_RESULT.to_string()),
            Err(e) => Reply::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(Action::parse("  "), Ok(None));
        assert_eq!(Action::parse("fetch"), Ok(Some(Action::Fetch)));
        assert_eq!(Action::parse("EXPORT"), Ok(Some(Action::Export)));
        assert_eq!(Action::parse("count 250"), Ok(Some(Action::SetCount(250))));
        assert_eq!(Action::parse("count 0"), Ok(Some(Action::SetCount(0))));
        assert_eq!(Action::parse("exit"), Ok(Some(Action::Quit)));
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(Action::parse("count 10000"), Ok(Some(Action::SetCount(10_000))));
        assert!(Action::parse("count 10001").is_err());
        assert!(Action::parse("count -1").is_err());
        assert!(Action::parse("count").is_err());
    }

    #[test]
    fn test_parse_count_rejects_extra_words() {
        assert_eq!(
            Action::parse("count 5 extra"),
            Err("usage: count <n>".to_string())
        );
        assert_eq!(Action::parse("  count   5  "), Ok(Some(Action::SetCount(5))));
    }

    #[test]
    fn test_parse_unknown() {
        let err = Action::parse("delete all").unwrap_err();
        assert!(err.contains("unknown command: delete"));
    }

    #[test]
    fn test_new_session_clamps_count() {
        assert_eq!(Session::new(50_000).max_count(), MAX_COUNT_LIMIT);
        assert!(Session::new(1000).messages().is_empty());
    }
}
