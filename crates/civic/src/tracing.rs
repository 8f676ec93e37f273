//! Logging utilities with civic segment prefixes.
//!
//! Provides consistent logging setup across civic components.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Engine crates at info, everything else at warn
pub const DEFAULT_FILTER: &str = "warn,civic=info,civic_core=info,civic_sync=info";

/// Initialize tracing with civic defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG), falling back to [`DEFAULT_FILTER`]
/// - Compact format suitable for terminal output
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize tracing with a custom default filter.
///
/// A second call is a no-op, so tests may call it freely.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Civic segment prefixes for logging.
pub mod prefix {
    /// Upstream sync operations
    pub const SYNC: &str = "⇅";
    /// Cache reads and writes
    pub const CACHE: &str = "⊔";
    /// Offline or stale fallback
    pub const STALE: &str = "⊘";
}
