use std::sync::Arc;

use serde::{Deserialize, Serialize};

use splitledger_core::{Entity, ExpenseId, GroupId};
use splitledger_ledger::{Expense, Member, Settlement};

/// Everything the ledger needs to know about one group, as of one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl GroupSnapshot {
    /// Parse a snapshot handed over by the surrounding application as JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| *e.id() == id)
    }
}

/// Data provider for group snapshots.
///
/// The application owns storage and sync; the ledger only ever reads a
/// consistent snapshot through this trait.
pub trait GroupSnapshotSource: Send + Sync {
    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot>;
}

impl<S> GroupSnapshotSource for Arc<S>
where
    S: GroupSnapshotSource + ?Sized,
{
    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot> {
        (**self).snapshot(group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_application_json() {
        let json = r#"{
            "members": [
                {"id": "00000000-0000-0000-0000-000000000001", "name": "Ana"},
                {"id": "00000000-0000-0000-0000-000000000002", "name": "Ben"}
            ],
            "expenses": [{
                "id": "00000000-0000-0000-0000-0000000000e1",
                "groupId": "00000000-0000-0000-0000-0000000000a1",
                "description": "Pizza",
                "amount": 2000,
                "paidBy": "00000000-0000-0000-0000-000000000001",
                "splitType": "equal",
                "splits": [
                    {"memberId": "00000000-0000-0000-0000-000000000001", "isIncluded": true},
                    {"memberId": "00000000-0000-0000-0000-000000000002", "isIncluded": true}
                ],
                "createdAt": "2024-05-01T18:30:00Z",
                "updatedAt": "2024-05-01T18:30:00Z"
            }]
        }"#;

        let snapshot = GroupSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.members.len(), 2);
        assert_eq!(snapshot.expenses[0].amount, 2000);
        assert!(snapshot.settlements.is_empty());
    }

    #[test]
    fn unknown_split_type_fails_to_parse() {
        let json = r#"{
            "expenses": [{
                "id": "00000000-0000-0000-0000-0000000000e1",
                "groupId": "00000000-0000-0000-0000-0000000000a1",
                "description": "Pizza",
                "amount": 2000,
                "paidBy": "00000000-0000-0000-0000-000000000001",
                "splitType": "shares",
                "splits": [],
                "createdAt": "2024-05-01T18:30:00Z",
                "updatedAt": "2024-05-01T18:30:00Z"
            }]
        }"#;

        let err = GroupSnapshot::from_json(json).unwrap_err();
        assert!(err.to_string().contains("unknown split type"));
    }
}
