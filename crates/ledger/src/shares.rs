//! Share allocation: who owes how much of a single expense.

use crate::model::{Cents, Expense, Shares, Split, SplitType};
use crate::rounding::RoundingMode;

/// Compute each included member's share of `expense`, in cents.
///
/// Uses [`RoundingMode::HalfAwayFromZero`] for percentage splits. See
/// [`compute_shares_with`].
pub fn compute_shares(expense: &Expense) -> Shares {
    compute_shares_with(expense, RoundingMode::default())
}

/// Compute each included member's share of `expense`, in cents.
///
/// - `Equal`: `amount / n` each; the first `amount % n` included members (in
///   split order) carry one extra cent.
/// - `Custom`: each included member owes its `split.amount` (0 if unset). The
///   amounts are trusted as given; checking that they add up is the job of
///   [`crate::validation`].
/// - `Percentage`: each share is rounded independently with `rounding`, then
///   the signed residue is added to the first included member.
///
/// For `Equal` and `Percentage` the shares always sum to `expense.amount`.
/// An expense with no included member yields an empty map.
pub fn compute_shares_with(expense: &Expense, rounding: RoundingMode) -> Shares {
    let included: Vec<&Split> = expense.included_splits().collect();
    let mut shares = Shares::new();

    let Some(first) = included.first() else {
        return shares;
    };

    match expense.split_type {
        SplitType::Equal => {
            let n = included.len() as Cents;
            let per_member = expense.amount.div_euclid(n);
            let remainder = expense.amount.rem_euclid(n);

            for (index, split) in included.iter().enumerate() {
                let extra = if (index as Cents) < remainder { 1 } else { 0 };
                *shares.entry(split.member_id).or_insert(0) += per_member + extra;
            }
        }
        SplitType::Custom => {
            for split in &included {
                *shares.entry(split.member_id).or_insert(0) += split.amount.unwrap_or(0);
            }
        }
        SplitType::Percentage => {
            let mut allocated: Cents = 0;
            for split in &included {
                let raw = expense.amount as f64 * split.percentage.unwrap_or(0.0) / 100.0;
                let share = rounding.round_cents(raw);
                allocated += share;
                *shares.entry(split.member_id).or_insert(0) += share;
            }

            let diff = expense.amount - allocated;
            if diff != 0 {
                *shares.entry(first.member_id).or_insert(0) += diff;
            }
        }
    }

    shares
}
