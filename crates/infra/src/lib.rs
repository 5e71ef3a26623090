//! Infrastructure layer: data access, configuration and the service that
//! feeds group snapshots through the ledger core.

pub mod config;
pub mod read_model;
pub mod service;

pub use config::{ConfigError, LedgerConfig};
pub use read_model::{GroupSnapshot, GroupSnapshotSource, InMemoryGroupStore};
pub use service::{GroupLedgerService, GroupSummary, ServiceError};
