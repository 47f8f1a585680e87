//! Display and interchange renderings of a message set.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use chrono::{DateTime, Local, TimeZone};

use crate::error::{ExportError, Result};
use crate::message::Message;

/// Column separator for the display text.
pub const DISPLAY_DELIMITER: &str = " | ";

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time for an epoch-millisecond timestamp.
pub fn local_time(millis: i64) -> Result<DateTime<Local>> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ExportError::InvalidDate {
            value: Some(millis.to_string()),
        })
}

/// One line per message: phone, local time, body.
pub fn to_display_text(messages: &[Message]) -> Result<String> {
    let mut text = String::new();
    for msg in messages {
        let time = local_time(msg.timestamp_millis()?)?;
        text.push_str(&msg.display_address());
        text.push_str(DISPLAY_DELIMITER);
        text.push_str(&time.format(DISPLAY_TIME_FORMAT).to_string());
        text.push_str(DISPLAY_DELIMITER);
        text.push_str(msg.body.as_deref().unwrap_or(""));
        text.push('\n');
    }
    Ok(text)
}

/// Pretty JSON array of `{address, date, body}`; non-ASCII is kept as-is.
pub fn to_interchange(messages: &[Message]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

/// Inverse of [`to_interchange`].
pub fn from_interchange(text: &str) -> Result<Vec<Message>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(address: Option<&str>, date: Option<&str>, body: Option<&str>) -> Message {
        Message {
            address: address.map(str::to_string),
            date: date.map(str::to_string),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_display_text_line() {
        let messages = vec![msg(Some("+821011112222"), Some("1700000000000"), Some("hello"))];
        let expected_time = local_time(1_700_000_000_000)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(
            to_display_text(&messages).unwrap(),
            format!("01011112222 | {} | hello\n", expected_time)
        );
    }

    #[test]
    fn test_display_text_unknown_sender() {
        let messages = vec![msg(None, Some("0"), None)];
        let text = to_display_text(&messages).unwrap();
        assert!(text.starts_with("Unknown | "));
        assert!(text.ends_with(" | \n"));
    }

    #[test]
    fn test_display_text_surfaces_bad_date() {
        let messages = vec![msg(Some("1"), None, Some("x"))];
        assert!(matches!(
            to_display_text(&messages),
            Err(ExportError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_interchange_keeps_non_ascii() {
        let messages = vec![msg(Some("+8210"), Some("1"), Some("안녕하세요 😀"))];
        let json = to_interchange(&messages).unwrap();
        assert!(json.contains("안녕하세요 😀"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_interchange_round_trip() {
        let messages = vec![
            msg(Some("+821011112222"), Some("1700000000000"), Some("a=b, c")),
            msg(None, Some("1700000001000"), Some("")),
            msg(Some("15881234"), None, None),
        ];
        let json = to_interchange(&messages).unwrap();
        assert!(json.contains("\"address\": null"));
        assert_eq!(from_interchange(&json).unwrap(), messages);
    }

    #[test]
    fn test_from_interchange_rejects_garbage() {
        assert!(matches!(
            from_interchange("{not json"),
            Err(ExportError::Interchange(_))
        ));
    }
}
