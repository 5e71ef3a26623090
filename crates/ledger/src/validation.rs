//! Boundary validation.
//!
//! The computation functions trust their input. Everything that can be wrong
//! with user-entered data (splits not adding up, nobody included, oversized
//! amounts) is caught here, before an expense reaches the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use splitledger_core::{DomainError, DomainResult, MemberId};

use crate::model::{Cents, Expense, Member, Split, SplitType};
use crate::money::format_cents;

/// Limits applied by [`Validator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Largest accepted expense amount, in cents.
    pub max_amount: Cents,
    pub max_description_len: usize,
    pub max_group_name_len: usize,
    pub max_member_name_len: usize,
    pub min_members: usize,
    pub max_members: usize,
    /// Allowed distance of a percentage split's total from 100.
    pub percentage_tolerance: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_amount: 100_000_000,
            max_description_len: 100,
            max_group_name_len: 50,
            max_member_name_len: 30,
            min_members: 2,
            max_members: 10,
            percentage_tolerance: 0.01,
        }
    }
}

/// Validates user input against [`ValidationLimits`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: ValidationLimits,
}

impl Validator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    pub fn validate_group_name(&self, name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Group name is required"));
        }
        if name.chars().count() > self.limits.max_group_name_len {
            return Err(DomainError::validation(format!(
                "Group name must be {} characters or less",
                self.limits.max_group_name_len
            )));
        }
        Ok(())
    }

    /// `existing` are the names already in the group; comparison ignores case.
    pub fn validate_member_name<'a>(
        &self,
        name: &str,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Member name is required"));
        }
        if name.chars().count() > self.limits.max_member_name_len {
            return Err(DomainError::validation(format!(
                "Name must be {} characters or less",
                self.limits.max_member_name_len
            )));
        }
        let lowered = name.to_lowercase();
        if existing.into_iter().any(|n| n.to_lowercase() == lowered) {
            return Err(DomainError::validation(
                "This name already exists in the group",
            ));
        }
        Ok(())
    }

    pub fn validate_members_count(&self, count: usize) -> DomainResult<()> {
        if count < self.limits.min_members {
            return Err(DomainError::validation(format!(
                "A group must have at least {} members",
                self.limits.min_members
            )));
        }
        if count > self.limits.max_members {
            return Err(DomainError::validation(format!(
                "A group can have at most {} members",
                self.limits.max_members
            )));
        }
        Ok(())
    }

    pub fn validate_amount(&self, cents: Cents) -> DomainResult<()> {
        if cents <= 0 {
            return Err(DomainError::validation("Amount must be greater than zero"));
        }
        if cents > self.limits.max_amount {
            return Err(DomainError::validation("Amount is too large"));
        }
        Ok(())
    }

    pub fn validate_description(&self, description: &str) -> DomainResult<()> {
        if description.trim().is_empty() {
            return Err(DomainError::validation("Description is required"));
        }
        if description.chars().count() > self.limits.max_description_len {
            return Err(DomainError::validation(format!(
                "Description must be {} characters or less",
                self.limits.max_description_len
            )));
        }
        Ok(())
    }

    /// Included custom amounts must be non-negative and add up to `total`
    /// exactly.
    pub fn validate_custom_splits(&self, splits: &[Split], total: Cents) -> DomainResult<()> {
        let included = require_included(splits)?;

        if included.iter().any(|s| s.amount.unwrap_or(0) < 0) {
            return Err(DomainError::validation("Split amounts cannot be negative"));
        }

        let split_total: Cents = included.iter().map(|s| s.amount.unwrap_or(0)).sum();
        let diff = total - split_total;
        if diff > 0 {
            return Err(DomainError::validation(format!(
                "Split amounts are {} short of the total",
                format_cents(diff)
            )));
        }
        if diff < 0 {
            return Err(DomainError::validation(format!(
                "Split amounts exceed the total by {}",
                format_cents(-diff)
            )));
        }
        Ok(())
    }

    /// Included percentages must each lie in `0..=100` and add up to 100
    /// (within the configured tolerance).
    pub fn validate_percentage_splits(&self, splits: &[Split]) -> DomainResult<()> {
        let included = require_included(splits)?;

        let out_of_range = included
            .iter()
            .map(|s| s.percentage.unwrap_or(0.0))
            .any(|pct| !(0.0..=100.0).contains(&pct));
        if out_of_range {
            return Err(DomainError::validation(
                "Each percentage must be between 0 and 100",
            ));
        }

        let total: f64 = included.iter().map(|s| s.percentage.unwrap_or(0.0)).sum();
        // False for NaN, so a NaN total or tolerance fails.
        let within = (total - 100.0).abs() <= self.limits.percentage_tolerance;
        if !within {
            return Err(DomainError::validation(format!(
                "Percentages must add up to 100% (currently {total:.1}%)"
            )));
        }
        Ok(())
    }

    /// Full check of an expense against the group it is recorded in.
    ///
    /// Beyond the per-field checks this requires the payer to be a member and
    /// exactly one split per member, with no split for anyone outside the group.
    pub fn validate_expense(&self, expense: &Expense, members: &[Member]) -> DomainResult<()> {
        self.validate_amount(expense.amount)?;
        self.validate_description(&expense.description)?;

        if !members.iter().any(|m| m.id == expense.paid_by) {
            return Err(DomainError::validation(
                "The payer must be a member of the group",
            ));
        }

        let mut seen: BTreeMap<MemberId, usize> = members.iter().map(|m| (m.id, 0)).collect();
        for split in &expense.splits {
            match seen.get_mut(&split.member_id) {
                Some(count) => *count += 1,
                None => {
                    return Err(DomainError::validation(
                        "A split refers to someone outside the group",
                    ));
                }
            }
        }
        if seen.values().any(|count| *count != 1) {
            return Err(DomainError::validation(
                "Every member needs exactly one split",
            ));
        }

        match expense.split_type {
            SplitType::Equal => require_included(&expense.splits).map(|_| ()),
            SplitType::Custom => self.validate_custom_splits(&expense.splits, expense.amount),
            SplitType::Percentage => self.validate_percentage_splits(&expense.splits),
        }
    }
}

fn require_included(splits: &[Split]) -> DomainResult<Vec<&Split>> {
    let included: Vec<&Split> = splits.iter().filter(|s| s.is_included).collect();
    if included.is_empty() {
        return Err(DomainError::validation(
            "At least one person must be included",
        ));
    }
    Ok(included)
}
