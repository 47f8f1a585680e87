//! Error taxonomy for the fetch/export pipeline.
//!
//! CHANGELOG:
//! - 04/02/2026 - Csv variant for non-filesystem CSV writer failures
//! - 03/02/2026 - Added DeviceNotFound for explicit serial selection
//! - 02/02/2026 - Initial implementation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the fetch and export actions.
///
/// "Nothing found" is not an error; see [`crate::bridge::Fetched::Empty`] and
/// [`crate::export::Exported::Empty`].
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("device bridge '{program}' is not available: {reason}")]
    ToolUnavailable { program: String, reason: String },

    #[error("no authorized device connected")]
    NoDeviceConnected,

    #[error("device '{serial}' is not connected or not authorized")]
    DeviceNotFound { serial: String },

    #[error("device bridge command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("invalid message date: {}", .value.as_deref().unwrap_or("<missing>"))]
    InvalidDate { value: Option<String> },

    #[error("interchange data error: {0}")]
    Interchange(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
