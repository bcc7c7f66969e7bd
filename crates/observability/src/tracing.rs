//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// The session core runs embedded in a desktop/browser shell, so the
/// default output is compact human-readable lines rather than JSON.
/// Configurable via `RUST_LOG`; safe to call multiple times (subsequent
/// calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
