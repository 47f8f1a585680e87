//! sms-export library
//!
//! Fetches received SMS from an Android device through adb and exports them
//! to CSV. Shared by the batch CLI and the interactive shell.
//!
//! CHANGELOG:
//! - 02/02/2026 - Initial library structure

pub mod bridge;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod message;
pub mod output;
pub mod record;
pub mod shell;

pub use bridge::{AdbBridge, Bridge, Fetched};
pub use error::ExportError;
pub use export::Exported;
pub use message::Message;
