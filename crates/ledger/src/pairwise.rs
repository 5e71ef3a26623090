//! Un-simplified debts: who owes whom, expense by expense, netted per pair.

use std::collections::BTreeMap;

use splitledger_core::MemberId;

use crate::model::{Cents, Debt, Expense, Settlement};
use crate::rounding::RoundingMode;
use crate::shares::compute_shares_with;

/// Signed debt per unordered pair; keyed `(lo, hi)`, positive = `lo` owes `hi`.
#[derive(Debug, Default)]
struct PairLedger {
    net: BTreeMap<(MemberId, MemberId), Cents>,
}

impl PairLedger {
    fn owe(&mut self, debtor: MemberId, creditor: MemberId, amount: Cents) {
        if debtor == creditor || amount == 0 {
            return;
        }
        if debtor < creditor {
            *self.net.entry((debtor, creditor)).or_insert(0) += amount;
        } else {
            *self.net.entry((creditor, debtor)).or_insert(0) -= amount;
        }
    }

    fn into_debts(self) -> Vec<Debt> {
        self.net
            .into_iter()
            .filter_map(|((lo, hi), net)| match net {
                0 => None,
                n if n > 0 => Some(Debt { from: lo, to: hi, amount: n }),
                n => Some(Debt { from: hi, to: lo, amount: -n }),
            })
            .collect()
    }
}

/// Direct debts between members, before simplification.
///
/// See [`pairwise_debts_with`]; percentage splits use the default rounding mode.
pub fn pairwise_debts(expenses: &[Expense], settlements: &[Settlement]) -> Vec<Debt> {
    pairwise_debts_with(expenses, settlements, RoundingMode::default())
}

/// Direct debts between members, before simplification.
///
/// Each included member other than the payer owes the payer its share
/// (as computed by the share allocator). A settlement reduces what its payer
/// owes its recipient. Mutual debts are netted, so each pair of members
/// appears at most once, ordered by member ids.
///
/// Applying the returned debts as payments zeroes the same balances
/// [`crate::compute_balances`] reports.
pub fn pairwise_debts_with(
    expenses: &[Expense],
    settlements: &[Settlement],
    rounding: RoundingMode,
) -> Vec<Debt> {
    let mut ledger = PairLedger::default();

    for expense in expenses {
        for (member_id, share) in compute_shares_with(expense, rounding) {
            ledger.owe(member_id, expense.paid_by, share);
        }
    }

    for settlement in settlements {
        ledger.owe(
            settlement.from_member_id,
            settlement.to_member_id,
            -settlement.amount,
        );
    }

    ledger.into_debts()
}
