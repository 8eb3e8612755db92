use crate::amortization::payment::monthly_payment;
use crate::core::money::{monthly_rate, round_money, Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Snapshot months used when the caller has no preference: years 1, 5 and 10.
pub const DEFAULT_MILESTONES: [u32; 3] = [12, 60, 120];

/// State of the loan at the end of a milestone month.
///
/// All amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSnapshot {
    /// 1-based month index.
    pub month: u32,
    pub payment: Money,
    /// Interest portion of this month's payment.
    pub interest: Money,
    /// Principal portion of this month's payment.
    pub principal: Money,
    /// Outstanding balance after the payment.
    pub balance: Money,
    /// Interest paid from month 1 up to and including this month.
    pub cumulative_interest: Money,
}

/// Replay the amortization schedule and keep the milestone months.
///
/// The snapshot set is `milestones` plus the final month. Milestones past
/// the term are never reached. The walk stops as soon as the balance hits
/// zero, so a schedule that repays early ends at that month.
///
/// # Examples
///
/// ```
/// use mortgage_engine::amortization::schedule::amortization_summary;
/// use rust_decimal_macros::dec;
///
/// let snapshots = amortization_summary(dec!(200_000), dec!(0.03), 360, &[12, 60, 120]);
/// let months: Vec<u32> = snapshots.iter().map(|s| s.month).collect();
/// assert_eq!(months, vec![12, 60, 120, 360]);
/// assert_eq!(snapshots.last().unwrap().balance, dec!(0));
/// ```
pub fn amortization_summary(
    principal: Money,
    annual_rate: Rate,
    months: u32,
    milestones: &[u32],
) -> Vec<AmortizationSnapshot> {
    let r = monthly_rate(annual_rate);
    let payment = monthly_payment(principal, annual_rate, months);

    let mut keep: BTreeSet<u32> = milestones.iter().copied().collect();
    keep.insert(months);

    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut snapshots = Vec::with_capacity(keep.len());

    for month in 1..=months {
        let interest = balance * r;
        let principal_part = payment - interest;
        balance = (balance - principal_part).max(Decimal::ZERO);
        cumulative_interest += interest;

        if keep.contains(&month) {
            snapshots.push(AmortizationSnapshot {
                month,
                payment: round_money(payment),
                interest: round_money(interest),
                principal: round_money(principal_part),
                balance: round_money(balance),
                cumulative_interest: round_money(cumulative_interest),
            });
        }

        if balance <= Decimal::ZERO {
            break;
        }
    }

    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_final_month_always_included() {
        let snapshots = amortization_summary(dec!(50_000), dec!(0.04), 48, &DEFAULT_MILESTONES);
        let months: Vec<u32> = snapshots.iter().map(|s| s.month).collect();
        // 60 and 120 lie past the term
        assert_eq!(months, vec![12, 48]);
    }

    #[test]
    fn test_first_month_split() {
        let snapshots = amortization_summary(dec!(200_000), dec!(0.03), 360, &[1]);
        let first = &snapshots[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.interest, dec!(500.00));
        assert_eq!(first.principal, dec!(343.21));
        assert_eq!(first.balance, dec!(199656.79));
        assert_eq!(first.cumulative_interest, dec!(500.00));
    }

    #[test]
    fn test_balance_declines_across_milestones() {
        let snapshots = amortization_summary(dec!(200_000), dec!(0.03), 360, &DEFAULT_MILESTONES);
        for pair in snapshots.windows(2) {
            assert!(pair[1].balance < pair[0].balance);
            assert!(pair[1].cumulative_interest > pair[0].cumulative_interest);
        }
    }

    #[test]
    fn test_final_balance_is_zero() {
        let snapshots = amortization_summary(dec!(175_000), dec!(0.0459), 264, &[]);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].month, 264);
        assert_eq!(snapshots[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let snapshots = amortization_summary(dec!(12_000), Decimal::ZERO, 24, &[12]);
        assert_eq!(snapshots[0].balance, dec!(6000));
        assert_eq!(snapshots[0].interest, Decimal::ZERO);
        assert_eq!(snapshots[1].balance, Decimal::ZERO);
        assert_eq!(snapshots[1].cumulative_interest, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_milestones_emit_once() {
        let snapshots = amortization_summary(dec!(10_000), dec!(0.05), 36, &[12, 12, 36]);
        assert_eq!(snapshots.len(), 2);
    }
}
