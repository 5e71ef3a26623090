//! Tracing/logging setup shared by every binary embedding the ledger.

/// Initialize process-wide logging with the format chosen by
/// `SPLITLEDGER_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use crate::tracing::{LogFormat, init_with};
