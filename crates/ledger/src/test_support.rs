//! Fixtures shared by the unit tests in this crate.

use splitledger_core::{GroupId, MemberId};
use uuid::Uuid;

use crate::model::{Cents, Expense, Member, Settlement, Split, SplitType};

/// Deterministic member id; smaller `n` sorts first.
pub fn member_id(n: u128) -> MemberId {
    MemberId::from_uuid(Uuid::from_u128(n))
}

pub fn group_id() -> GroupId {
    GroupId::from_uuid(Uuid::from_u128(0xfeed))
}

pub fn member(n: u128, name: &str) -> Member {
    Member::new(member_id(n), name)
}

pub fn expense(
    amount: Cents,
    paid_by: MemberId,
    split_type: SplitType,
    splits: Vec<Split>,
) -> Expense {
    Expense::new(group_id(), "test expense", amount, paid_by, split_type, splits)
}

/// Equal split across `members`, all included.
pub fn equal_expense(amount: Cents, paid_by: MemberId, members: &[MemberId]) -> Expense {
    let splits = members.iter().copied().map(Split::included).collect();
    expense(amount, paid_by, SplitType::Equal, splits)
}

pub fn settlement(from: MemberId, to: MemberId, amount: Cents) -> Settlement {
    Settlement::new(group_id(), from, to, amount)
}
