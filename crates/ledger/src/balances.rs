//! Net balance aggregation across a group's expenses and settlements.

use splitledger_core::{DomainError, DomainResult, MemberId};

use crate::model::{Balances, Cents, Expense, Member, Settlement};
use crate::rounding::RoundingMode;
use crate::shares::compute_shares_with;

/// Fold all expenses and settlements of a group into one net balance per member.
///
/// See [`compute_balances_with`]; percentage splits use the default rounding mode.
pub fn compute_balances(
    expenses: &[Expense],
    settlements: &[Settlement],
    members: &[Member],
) -> Balances {
    compute_balances_with(expenses, settlements, members, RoundingMode::default())
}

/// Fold all expenses and settlements of a group into one net balance per member.
///
/// Every supplied member appears in the result, at 0 if it had no activity.
/// The payer of an expense is credited the full amount and every included
/// member (the payer too) is debited its share. A settlement credits its
/// payer and debits its recipient.
///
/// Ids referenced by an expense or settlement but missing from `members` are
/// still accumulated and show up in the result, so that the map stays
/// zero-sum even when the member list is stale.
///
/// The result sums to zero whenever every expense's shares add up to its
/// amount, which boundary validation guarantees for custom splits and the
/// allocator guarantees for the other methods.
pub fn compute_balances_with(
    expenses: &[Expense],
    settlements: &[Settlement],
    members: &[Member],
    rounding: RoundingMode,
) -> Balances {
    let mut balances: Balances = members.iter().map(|m| (m.id, 0)).collect();

    for expense in expenses {
        *balances.entry(expense.paid_by).or_insert(0) += expense.amount;

        for (member_id, share) in compute_shares_with(expense, rounding) {
            *balances.entry(member_id).or_insert(0) -= share;
        }
    }

    for settlement in settlements {
        *balances.entry(settlement.from_member_id).or_insert(0) += settlement.amount;
        *balances.entry(settlement.to_member_id).or_insert(0) -= settlement.amount;
    }

    balances
}

/// Total still to be settled: the sum of all positive balances.
pub fn total_owed(balances: &Balances) -> Cents {
    balances.values().filter(|b| **b > 0).sum()
}

/// Exact sum of all balances (widened so corrupt input cannot overflow).
pub fn balance_sum(balances: &Balances) -> i128 {
    balances.values().map(|b| *b as i128).sum()
}

/// Check the zero-sum post-condition before handing balances to the simplifier.
pub fn ensure_zero_sum(balances: &Balances) -> DomainResult<()> {
    match balance_sum(balances) {
        0 => Ok(()),
        sum => Err(DomainError::BalanceIntegrity { sum }),
    }
}

/// Balances ordered for display: largest creditor first, largest debtor last.
/// Equal balances are ordered by member id.
pub fn sorted_by_balance(balances: &Balances) -> Vec<(MemberId, Cents)> {
    let mut rows: Vec<(MemberId, Cents)> = balances.iter().map(|(id, b)| (*id, *b)).collect();
    rows.sort_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Split, SplitType};
    use crate::test_support::{equal_expense, expense, member, member_id, settlement};
    use proptest::prelude::*;

    #[test]
    fn members_without_activity_appear_at_zero() {
        let members = vec![member(1, "Ana"), member(2, "Ben"), member(3, "Cy")];
        let balances = compute_balances(&[], &[], &members);

        assert_eq!(balances.len(), 3);
        assert!(balances.values().all(|b| *b == 0));
    }

    #[test]
    fn payer_is_credited_amount_minus_own_share() {
        let members = vec![member(1, "Ana"), member(2, "Ben"), member(3, "Cy")];
        let (a, b, c) = (member_id(1), member_id(2), member_id(3));

        let balances = compute_balances(&[equal_expense(100, a, &[a, b, c])], &[], &members);

        // a's share is 34 (remainder cent), so a is owed 66.
        assert_eq!(balances[&a], 66);
        assert_eq!(balances[&b], -33);
        assert_eq!(balances[&c], -33);
        assert_eq!(balance_sum(&balances), 0);
    }

    #[test]
    fn payer_outside_the_split_is_owed_everything() {
        let members = vec![member(1, "Ana"), member(2, "Ben")];
        let (a, b) = (member_id(1), member_id(2));
        let e = expense(
            800,
            a,
            SplitType::Equal,
            vec![Split::excluded(a), Split::included(b)],
        );

        let balances = compute_balances(&[e], &[], &members);
        assert_eq!(balances[&a], 800);
        assert_eq!(balances[&b], -800);
    }

    #[test]
    fn settlement_clears_matching_debt() {
        let members = vec![member(1, "Ana"), member(2, "Ben")];
        let (a, b) = (member_id(1), member_id(2));
        let e = expense(
            500,
            a,
            SplitType::Custom,
            vec![Split::custom(a, 0), Split::custom(b, 500)],
        );

        let before = compute_balances(std::slice::from_ref(&e), &[], &members);
        assert_eq!((before[&a], before[&b]), (500, -500));

        let after = compute_balances(&[e], &[settlement(b, a, 500)], &members);
        assert_eq!((after[&a], after[&b]), (0, 0));
    }

    #[test]
    fn partial_settlement_reduces_debt() {
        let members = vec![member(1, "Ana"), member(2, "Ben")];
        let (a, b) = (member_id(1), member_id(2));

        let balances = compute_balances(
            &[equal_expense(1000, a, &[a, b])],
            &[settlement(b, a, 200)],
            &members,
        );
        assert_eq!((balances[&a], balances[&b]), (300, -300));
    }

    #[test]
    fn ids_outside_member_list_are_kept() {
        let members = vec![member(1, "Ana")];
        let (a, stranger) = (member_id(1), member_id(99));

        let balances = compute_balances(&[equal_expense(200, a, &[a, stranger])], &[], &members);
        assert_eq!(balances[&stranger], -100);
        assert_eq!(balance_sum(&balances), 0);
    }

    #[test]
    fn expense_with_nobody_included_breaks_integrity_check() {
        let members = vec![member(1, "Ana"), member(2, "Ben")];
        let (a, b) = (member_id(1), member_id(2));
        let e = expense(
            300,
            a,
            SplitType::Equal,
            vec![Split::excluded(a), Split::excluded(b)],
        );

        let balances = compute_balances(&[e], &[], &members);
        assert_eq!(
            ensure_zero_sum(&balances),
            Err(DomainError::BalanceIntegrity { sum: 300 })
        );
    }

    #[test]
    fn total_owed_sums_creditors_only() {
        let mut balances = Balances::new();
        balances.insert(member_id(1), 300);
        balances.insert(member_id(2), 200);
        balances.insert(member_id(3), -100);
        balances.insert(member_id(4), -400);

        assert_eq!(total_owed(&balances), 500);
        assert_eq!(total_owed(&Balances::new()), 0);
    }

    #[test]
    fn sorted_by_balance_puts_creditors_first_and_breaks_ties_by_id() {
        let mut balances = Balances::new();
        balances.insert(member_id(4), -400);
        balances.insert(member_id(3), 0);
        balances.insert(member_id(2), 200);
        balances.insert(member_id(1), 200);

        let order: Vec<_> = sorted_by_balance(&balances).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![member_id(1), member_id(2), member_id(3), member_id(4)]);
    }

    #[derive(Debug, Clone)]
    enum Activity {
        Equal { amount: Cents, payer: usize, included: Vec<bool> },
        Percentage { amount: Cents, payer: usize, weights: Vec<u8> },
        Custom { payer: usize, amounts: Vec<Cents> },
        Settle { from: usize, to: usize, amount: Cents },
    }

    const GROUP_SIZE: usize = 5;

    fn activity() -> impl Strategy<Value = Activity> {
        prop_oneof![
            (
                1i64..1_000_000,
                0..GROUP_SIZE,
                prop::collection::vec(any::<bool>(), GROUP_SIZE),
            )
                .prop_map(|(amount, payer, included)| Activity::Equal {
                    amount,
                    payer,
                    included,
                }),
            (
                1i64..1_000_000,
                0..GROUP_SIZE,
                prop::collection::vec(1u8..100, GROUP_SIZE),
            )
                .prop_map(|(amount, payer, weights)| Activity::Percentage {
                    amount,
                    payer,
                    weights,
                }),
            (0..GROUP_SIZE, prop::collection::vec(0i64..100_000, GROUP_SIZE))
                .prop_map(|(payer, amounts)| Activity::Custom { payer, amounts }),
            (0..GROUP_SIZE, 0..GROUP_SIZE, 1i64..100_000)
                .prop_map(|(from, to, amount)| Activity::Settle { from, to, amount }),
        ]
    }

    fn build(activities: &[Activity]) -> (Vec<Expense>, Vec<Settlement>) {
        let ids: Vec<MemberId> = (1..=GROUP_SIZE as u128).map(member_id).collect();
        let mut expenses = Vec::new();
        let mut settlements = Vec::new();

        for act in activities {
            match act {
                Activity::Equal { amount, payer, included } => {
                    let mut splits: Vec<Split> = ids
                        .iter()
                        .zip(included)
                        .map(|(id, inc)| {
                            if *inc {
                                Split::included(*id)
                            } else {
                                Split::excluded(*id)
                            }
                        })
                        .collect();
                    // Boundary validation rejects expenses nobody shares.
                    if !included.iter().any(|i| *i) {
                        splits[0].is_included = true;
                    }
                    expenses.push(expense(*amount, ids[*payer], SplitType::Equal, splits));
                }
                Activity::Percentage { amount, payer, weights } => {
                    let total: f64 = weights.iter().map(|w| *w as f64).sum();
                    let splits = ids
                        .iter()
                        .zip(weights)
                        .map(|(id, w)| Split::percentage(*id, *w as f64 * 100.0 / total))
                        .collect();
                    expenses.push(expense(*amount, ids[*payer], SplitType::Percentage, splits));
                }
                Activity::Custom { payer, amounts } => {
                    let amount: Cents = amounts.iter().sum();
                    if amount == 0 {
                        continue;
                    }
                    let splits = ids
                        .iter()
                        .zip(amounts)
                        .map(|(id, a)| Split::custom(*id, *a))
                        .collect();
                    expenses.push(expense(amount, ids[*payer], SplitType::Custom, splits));
                }
                Activity::Settle { from, to, amount } => {
                    settlements.push(settlement(ids[*from], ids[*to], *amount));
                }
            }
        }

        (expenses, settlements)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any mix of valid expenses and settlements over a fixed
        /// member set, balances sum to exactly zero.
        #[test]
        fn balances_always_sum_to_zero(activities in prop::collection::vec(activity(), 0..30)) {
            let members: Vec<Member> = (1..=GROUP_SIZE as u128).map(|n| member(n, "m")).collect();
            let (expenses, settlements) = build(&activities);

            let balances = compute_balances(&expenses, &settlements, &members);

            prop_assert_eq!(balances.len(), GROUP_SIZE);
            prop_assert_eq!(balance_sum(&balances), 0);
            prop_assert!(ensure_zero_sum(&balances).is_ok());
        }

        /// Property: the fold is order-independent.
        #[test]
        fn balances_ignore_input_order(activities in prop::collection::vec(activity(), 0..20)) {
            let members: Vec<Member> = (1..=GROUP_SIZE as u128).map(|n| member(n, "m")).collect();
            let (mut expenses, mut settlements) = build(&activities);

            let forward = compute_balances(&expenses, &settlements, &members);
            expenses.reverse();
            settlements.reverse();
            let backward = compute_balances(&expenses, &settlements, &members);

            prop_assert_eq!(forward, backward);
        }
    }
}
