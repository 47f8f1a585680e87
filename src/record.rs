//! Record parser for `content query` output.
//!
//! Each output line is a comma-separated list of `key=value` columns. Values
//! may themselves contain `=` (base64, URL-encoded text), so every token is
//! split on its first `=` only.
//!
//! CHANGELOG:
//! - 03/02/2026 - Strip the `Row: N` prefix printed before the first column
//! - 02/02/2026 - Initial implementation

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// One loosely-typed row of bridge output. Any key may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Insert a column; a repeated key keeps the last value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A token that had no `=` and was dropped from its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedToken {
    pub token: String,
}

fn row_prefix() -> &'static Regex {
    static ROW_PREFIX: OnceLock<Regex> = OnceLock::new();
    ROW_PREFIX.get_or_init(|| Regex::new(r"^\s*Row:\s*\d+\s+").expect("valid row prefix regex"))
}

/// Parse one line, returning the record and the tokens that were dropped.
pub fn parse_line_with_diagnostics(line: &str) -> (RawRecord, Vec<MalformedToken>) {
    let line = row_prefix().replace(line, "");
    let mut record = RawRecord::new();
    let mut malformed = Vec::new();

    for token in line.split(',') {
        if token.trim().is_empty() {
            continue;
        }
        match token.split_once('=') {
            Some((key, value)) => record.insert(key.trim(), value.trim()),
            None => malformed.push(MalformedToken {
                token: token.to_string(),
            }),
        }
    }

    (record, malformed)
}

/// Parse one line into a [`RawRecord`], logging any dropped tokens.
pub fn parse_line(line: &str) -> RawRecord {
    let (record, malformed) = parse_line_with_diagnostics(line);
    for bad in &malformed {
        tracing::warn!(token = %bad.token, "skipping token without '='");
    }
    record
}

/// Parse every non-blank line of bridge output.
pub fn parse_output(text: &str) -> Vec<RawRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_equals_only() {
        let record = parse_line("body=a=b=c,type=1");
        assert_eq!(record.get("body"), Some("a=b=c"));
        assert_eq!(record.get("type"), Some("1"));
    }

    #[test]
    fn test_base64_padding_preserved() {
        let record = parse_line("body=aGVsbG8=,address=+8210");
        assert_eq!(record.get("body"), Some("aGVsbG8="));
    }

    #[test]
    fn test_keys_and_values_trimmed() {
        let record = parse_line("  address = +821011112222 ,  date=1700000000000  ");
        assert_eq!(record.get("address"), Some("+821011112222"));
        assert_eq!(record.get("date"), Some("1700000000000"));
    }

    #[test]
    fn test_malformed_tokens_reported_not_fatal() {
        let (record, malformed) = parse_line_with_diagnostics("address=1, see you soon,type=1");
        assert_eq!(record.get("address"), Some("1"));
        assert_eq!(record.get("type"), Some("1"));
        assert_eq!(
            malformed,
            vec![MalformedToken {
                token: " see you soon".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_value_is_present() {
        let record = parse_line("body=,type=1");
        assert_eq!(record.get("body"), Some(""));
    }

    #[test]
    fn test_trailing_comma_ignored() {
        let (record, malformed) = parse_line_with_diagnostics("type=1,");
        assert_eq!(record.len(), 1);
        assert!(malformed.is_empty());
    }

    #[test]
    fn test_row_prefix_stripped() {
        let record = parse_line("Row: 0 _id=12, address=+821011112222, type=1");
        assert_eq!(record.get("_id"), Some("12"));
        assert_eq!(record.get("address"), Some("+821011112222"));
    }

    #[test]
    fn test_parse_output_skips_blank_lines() {
        let records = parse_output("type=1,body=a\n\n   \ntype=2,body=b\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("body"), Some("b"));
    }
}
