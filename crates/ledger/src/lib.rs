//! Expense ledger core: share allocation, balance aggregation and debt
//! simplification.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Every
//! function here is a deterministic computation over borrowed inputs, so
//! callers may run them concurrently on independent snapshots.
//!
//! All money is integer cents ([`Cents`]). Floating point only appears as
//! the percentage input of [`SplitType::Percentage`].

pub mod balances;
pub mod model;
pub mod money;
pub mod pairwise;
pub mod rounding;
pub mod shares;
pub mod simplify;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use balances::{
    balance_sum, compute_balances, compute_balances_with, ensure_zero_sum, sorted_by_balance,
    total_owed,
};
pub use model::{Balances, Cents, Debt, Expense, Member, Settlement, Shares, Split, SplitType};
pub use money::{format_cents, parse_cents};
pub use pairwise::{pairwise_debts, pairwise_debts_with};
pub use rounding::RoundingMode;
pub use shares::{compute_shares, compute_shares_with};
pub use simplify::{simplify_debts, try_simplify_debts};
pub use validation::{ValidationLimits, Validator};
