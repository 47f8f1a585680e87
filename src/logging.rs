//! Tracing subscriber setup shared by both binaries.
//!
//! CHANGELOG:
//! - 04/02/2026 - `RUST_LOG` replaces the default level instead of being capped by it
//! - 02/02/2026 - Initial implementation

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter from a `RUST_LOG`-style spec, falling back to [`DEFAULT_FILTER`].
pub fn env_filter(spec: Option<&str>) -> EnvFilter {
    spec.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber, filtered by `RUST_LOG`.
pub fn init() {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(spec.as_deref()))
        .init();
}
