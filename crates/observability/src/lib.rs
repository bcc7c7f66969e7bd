//! `printdesk-observability` — shared tracing/logging setup.

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
