//! Command implementations.
//!
//! CHANGELOG:
//! - 02/02/2026 - Batch, fetch and export commands
//! - 01/10/2026 - Initial module structure

pub mod batch;
pub mod export;
pub mod fetch;

/// Printed whenever a fetch or export finds no inbound messages.
pub const NO_RESULT: &str = "No result found.";
