use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{DomainError, Entity, ExpenseId, GroupId, MemberId, SettlementId};

/// Money in minor currency units (cents).
pub type Cents = i64;

/// Net position per member. Positive = is owed money, negative = owes money.
pub type Balances = BTreeMap<MemberId, Cents>;

/// Owed share per member for a single expense.
pub type Shares = BTreeMap<MemberId, Cents>;

/// A member of a group. Supplied by the caller, never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// How an expense is divided between its included members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SplitType {
    Equal,
    Custom,
    Percentage,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Custom => "custom",
            SplitType::Percentage => "percentage",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            SplitType::Equal => "Split Equally",
            SplitType::Custom => "Custom Amounts",
            SplitType::Percentage => "By Percentage",
        }
    }
}

impl core::fmt::Display for SplitType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SplitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(SplitType::Equal),
            "custom" => Ok(SplitType::Custom),
            "percentage" => Ok(SplitType::Percentage),
            other => Err(DomainError::unknown_split_type(other)),
        }
    }
}

impl TryFrom<String> for SplitType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SplitType> for String {
    fn from(value: SplitType) -> Self {
        value.as_str().to_string()
    }
}

/// One member's participation in one expense.
///
/// `amount` is only read by [`SplitType::Custom`], `percentage` (0..=100) only
/// by [`SplitType::Percentage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub member_id: MemberId,
    pub is_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Split {
    pub fn included(member_id: MemberId) -> Self {
        Self {
            member_id,
            is_included: true,
            amount: None,
            percentage: None,
        }
    }

    pub fn excluded(member_id: MemberId) -> Self {
        Self {
            is_included: false,
            ..Self::included(member_id)
        }
    }

    pub fn custom(member_id: MemberId, amount: Cents) -> Self {
        Self {
            amount: Some(amount),
            ..Self::included(member_id)
        }
    }

    pub fn percentage(member_id: MemberId, percentage: f64) -> Self {
        Self {
            percentage: Some(percentage),
            ..Self::included(member_id)
        }
    }
}

/// A shared expense paid by one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    pub description: String,
    /// Total paid, in cents.
    pub amount: Cents,
    pub paid_by: MemberId,
    pub split_type: SplitType,
    /// One split per group member, included or not. Order matters: remainder
    /// and rounding cents go to the earliest included members.
    pub splits: Vec<Split>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        group_id: GroupId,
        description: impl Into<String>,
        amount: Cents,
        paid_by: MemberId,
        split_type: SplitType,
        splits: Vec<Split>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            group_id,
            description: description.into(),
            amount,
            paid_by,
            split_type,
            splits,
            created_at: now,
            updated_at: now,
        }
    }

    /// Included splits in presentation order.
    pub fn included_splits(&self) -> impl Iterator<Item = &Split> + '_ {
        self.splits.iter().filter(|s| s.is_included)
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A real-world payment from one member to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: SettlementId,
    pub group_id: GroupId,
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
    pub amount: Cents,
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(group_id: GroupId, from: MemberId, to: MemberId, amount: Cents) -> Self {
        Self {
            id: SettlementId::new(),
            group_id,
            from_member_id: from,
            to_member_id: to,
            amount,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Settlement {
    type Id = SettlementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Suggested payment: `from` pays `to` the given amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Cents,
}
