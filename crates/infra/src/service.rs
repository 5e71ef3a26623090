//! Group ledger service: snapshot in, balances and suggested payments out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use splitledger_core::{DomainError, ExpenseId, GroupId};
use splitledger_ledger::{
    Balances, Cents, Debt, Expense, Shares, compute_balances_with, compute_shares_with,
    ensure_zero_sum, pairwise_debts_with, simplify_debts, total_owed,
};

use crate::config::LedgerConfig;
use crate::read_model::GroupSnapshotSource;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Computed state of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: GroupId,
    pub balances: Balances,
    /// Sum of all positive balances.
    pub total_owed: Cents,
    /// Minimal list of payments that settles the group.
    pub debts: Vec<Debt>,
    /// Direct member-to-member debts before simplification.
    pub pairwise: Vec<Debt>,
}

impl GroupSummary {
    pub fn is_settled(&self) -> bool {
        self.total_owed == 0
    }
}

/// Reads group snapshots from `S` and runs them through the ledger core.
///
/// Stateless apart from its configuration: every call recomputes from a
/// fresh snapshot.
#[derive(Debug)]
pub struct GroupLedgerService<S> {
    source: S,
    config: LedgerConfig,
}

impl<S> GroupLedgerService<S>
where
    S: GroupSnapshotSource,
{
    pub fn new(source: S, config: LedgerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Balances, total owed and suggested payments for a group.
    ///
    /// Fails with `DomainError::BalanceIntegrity` (wrapped) if the balances
    /// do not sum to zero, which means the stored data skipped validation.
    pub fn summary(&self, group_id: GroupId) -> Result<GroupSummary, ServiceError> {
        let snapshot = self
            .source
            .snapshot(group_id)
            .ok_or(ServiceError::GroupNotFound(group_id))?;

        tracing::debug!(
            %group_id,
            members = snapshot.members.len(),
            expenses = snapshot.expenses.len(),
            settlements = snapshot.settlements.len(),
            "loaded group snapshot"
        );

        let rounding = self.config.rounding;
        let balances = compute_balances_with(
            &snapshot.expenses,
            &snapshot.settlements,
            &snapshot.members,
            rounding,
        );

        if let Err(err) = ensure_zero_sum(&balances) {
            tracing::error!(
                %group_id,
                error = %err,
                "group balances failed integrity check"
            );
            return Err(err.into());
        }

        let debts = simplify_debts(&balances);
        let pairwise = pairwise_debts_with(&snapshot.expenses, &snapshot.settlements, rounding);
        let total_owed = total_owed(&balances);

        tracing::info!(
            %group_id,
            total_owed,
            payments = debts.len(),
            pairwise = pairwise.len(),
            "computed group summary"
        );

        Ok(GroupSummary {
            group_id,
            balances,
            total_owed,
            debts,
            pairwise,
        })
    }

    /// Per-member shares of one expense in a group.
    pub fn shares_for(
        &self,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> Result<Shares, ServiceError> {
        let snapshot = self
            .source
            .snapshot(group_id)
            .ok_or(ServiceError::GroupNotFound(group_id))?;
        let expense = snapshot
            .expense(expense_id)
            .ok_or(ServiceError::ExpenseNotFound(expense_id))?;

        Ok(compute_shares_with(expense, self.config.rounding))
    }

    /// Boundary check for an expense about to be recorded in `group_id`.
    pub fn validate_expense(
        &self,
        group_id: GroupId,
        expense: &Expense,
    ) -> Result<(), ServiceError> {
        let snapshot = self
            .source
            .snapshot(group_id)
            .ok_or(ServiceError::GroupNotFound(group_id))?;

        if expense.group_id != group_id {
            return Err(DomainError::validation("Expense belongs to a different group").into());
        }

        self.config
            .validator()
            .validate_expense(expense, &snapshot.members)
            .inspect_err(|err| tracing::warn!(%group_id, error = %err, "rejected expense"))?;
        Ok(())
    }
}
