use std::collections::HashMap;
use std::sync::RwLock;

use splitledger_core::{Entity, ExpenseId, GroupId};
use splitledger_ledger::{Expense, Member, Settlement};

use super::snapshot::{GroupSnapshot, GroupSnapshotSource};

/// In-memory group store for tests/dev.
///
/// Readers get a cloned snapshot, so no computation ever runs under the lock.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    inner: RwLock<HashMap<GroupId, GroupSnapshot>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the member list of a group (creating the group if needed).
    pub fn put_members(&self, group_id: GroupId, members: Vec<Member>) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(group_id).or_default().members = members;
        }
    }

    /// Insert an expense, or replace the stored one with the same id.
    pub fn upsert_expense(&self, expense: Expense) {
        if let Ok(mut map) = self.inner.write() {
            let expenses = &mut map.entry(expense.group_id).or_default().expenses;
            match expenses.iter_mut().find(|e| e.id() == expense.id()) {
                Some(existing) => *existing = expense,
                None => expenses.push(expense),
            }
        }
    }

    /// Returns whether an expense was removed.
    pub fn remove_expense(&self, group_id: GroupId, expense_id: ExpenseId) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        let Some(group) = map.get_mut(&group_id) else {
            return false;
        };
        let before = group.expenses.len();
        group.expenses.retain(|e| *e.id() != expense_id);
        group.expenses.len() != before
    }

    pub fn add_settlement(&self, settlement: Settlement) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(settlement.group_id)
                .or_default()
                .settlements
                .push(settlement);
        }
    }

    /// Drop everything recorded for a group.
    pub fn clear_group(&self, group_id: GroupId) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&group_id);
        }
    }
}

impl GroupSnapshotSource for InMemoryGroupStore {
    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot> {
        let map = self.inner.read().ok()?;
        map.get(&group_id).cloned()
    }
}
