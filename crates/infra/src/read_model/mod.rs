//! Read-only access to a group's members, expenses and settlements.

pub mod group_store;
pub mod snapshot;

pub use group_store::InMemoryGroupStore;
pub use snapshot::{GroupSnapshot, GroupSnapshotSource};
