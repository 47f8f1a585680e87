//! Inbound message projection and phone normalization.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial implementation

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::record::RawRecord;

/// `type` column value for a received message.
pub const INBOUND_TYPE: &str = "1";

/// Placeholder for a message with no sender address.
pub const UNKNOWN_ADDRESS: &str = "Unknown";

const KOREA_COUNTRY_CODE: &str = "+82";

/// A received SMS. Absent columns stay `None`, distinct from empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub address: Option<String>,
    /// Epoch milliseconds, as the device reported it.
    pub date: Option<String>,
    pub body: Option<String>,
}

impl Message {
    /// Project an inbound record; other message types yield `None`.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        if record.get("type") != Some(INBOUND_TYPE) {
            return None;
        }
        Some(Self {
            address: record.get("address").map(str::to_string),
            date: record.get("date").map(str::to_string),
            body: record.get("body").map(str::to_string),
        })
    }

    /// Parsed `date` in epoch milliseconds.
    pub fn timestamp_millis(&self) -> Result<i64> {
        self.date
            .as_deref()
            .and_then(|d| d.parse::<i64>().ok())
            .ok_or_else(|| ExportError::InvalidDate {
                value: self.date.clone(),
            })
    }

    /// Sender rendered for output: normalized, or [`UNKNOWN_ADDRESS`].
    pub fn display_address(&self) -> String {
        match self.address.as_deref() {
            Some(address) => normalize_phone(address),
            None => UNKNOWN_ADDRESS.to_string(),
        }
    }
}

/// Keep inbound records and project them to [`Message`]s, in input order.
pub fn project(records: &[RawRecord]) -> Vec<Message> {
    records.iter().filter_map(Message::from_record).collect()
}

/// Rewrite a leading `+82` country code to the domestic trunk prefix `0`.
///
/// `+821012345678` becomes `01012345678`. Other numbers are unchanged.
pub fn normalize_phone(address: &str) -> String {
    match address.strip_prefix(KOREA_COUNTRY_CODE) {
        Some(rest) => format!("0{}", rest),
        None => address.to_string(),
    }
}
