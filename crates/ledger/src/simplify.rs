//! Debt simplification (minimum cash flow).
//!
//! Replaces the web of who-owes-whom with a short list of payments that
//! brings every balance to zero. The greedy matching below is optimal in
//! transaction count only under the usual minimum-cash-flow assumption that
//! any debtor may pay any creditor; it never consults which members actually
//! shared an expense.

use splitledger_core::{DomainResult, MemberId};

use crate::balances::ensure_zero_sum;
use crate::model::{Balances, Cents, Debt};

#[derive(Debug, Clone, Copy)]
struct Position {
    member_id: MemberId,
    remaining: Cents,
}

/// Produce suggested payments that zero all balances.
///
/// Creditors (`balance > 0`) and debtors (`balance < 0`) are each sorted by
/// amount descending, ties broken by member id ascending. Two cursors then
/// walk the lists, moving `min(creditor, debtor)` at each step and advancing
/// whichever side is exhausted (both when they match exactly).
///
/// On a zero-sum map the result has at most `creditors + debtors - 1`
/// entries. If the map is not zero-sum the walk stops when either side runs
/// out and the residue is left unmatched; use [`try_simplify_debts`] to
/// reject such input instead.
pub fn simplify_debts(balances: &Balances) -> Vec<Debt> {
    let mut creditors: Vec<Position> = Vec::new();
    let mut debtors: Vec<Position> = Vec::new();

    for (member_id, balance) in balances {
        if *balance > 0 {
            creditors.push(Position {
                member_id: *member_id,
                remaining: *balance,
            });
        } else if *balance < 0 {
            debtors.push(Position {
                member_id: *member_id,
                remaining: -balance,
            });
        }
    }

    let by_amount_then_id = |a: &Position, b: &Position| {
        b.remaining
            .cmp(&a.remaining)
            .then_with(|| a.member_id.cmp(&b.member_id))
    };
    creditors.sort_by(by_amount_then_id);
    debtors.sort_by(by_amount_then_id);

    let mut debts = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];

        let transfer = creditor.remaining.min(debtor.remaining);
        if transfer > 0 {
            debts.push(Debt {
                from: debtor.member_id,
                to: creditor.member_id,
                amount: transfer,
            });
        }

        creditor.remaining -= transfer;
        debtor.remaining -= transfer;

        if creditor.remaining == 0 {
            i += 1;
        }
        if debtor.remaining == 0 {
            j += 1;
        }
    }

    tracing::trace!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        payments = debts.len(),
        "simplified debts"
    );

    debts
}

/// Like [`simplify_debts`], but first checks that `balances` sums to zero and
/// fails with `DomainError::BalanceIntegrity` otherwise.
pub fn try_simplify_debts(balances: &Balances) -> DomainResult<Vec<Debt>> {
    ensure_zero_sum(balances)?;
    Ok(simplify_debts(balances))
}
