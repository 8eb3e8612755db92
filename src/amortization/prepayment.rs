//! Interest saved by a one-off principal prepayment.
//!
//! The installment is kept constant after the prepayment, so the saving
//! shows up as a shorter schedule rather than a lower payment.

use crate::amortization::payment::monthly_payment;
use crate::core::money::{monthly_rate, round_money, Money, Rate};
use rust_decimal::Decimal;

/// Total interest of the unmodified schedule.
fn baseline_interest(principal: Money, r: Rate, payment: Money, months: u32) -> Money {
    let mut balance = principal;
    let mut total = Decimal::ZERO;
    for _ in 1..=months {
        let interest = balance * r;
        total += interest;
        balance = (balance - (payment - interest)).max(Decimal::ZERO);
        if balance <= Decimal::ZERO {
            break;
        }
    }
    total
}

/// Total interest when `extra` is paid off the balance in `apply_at_month`.
///
/// The interest of the prepayment month accrues on the balance before the
/// prepayment; the reduced balance only shows in the following months.
/// The last payment is capped at `balance + interest`.
fn interest_with_prepayment(
    principal: Money,
    r: Rate,
    payment: Money,
    months: u32,
    extra: Money,
    apply_at_month: u32,
) -> Money {
    let mut balance = principal;
    let mut total = Decimal::ZERO;
    for month in 1..=months {
        let interest = balance * r;
        if month == apply_at_month {
            balance = (balance - extra).max(Decimal::ZERO);
        }

        let due = if balance + interest > payment {
            payment
        } else {
            balance + interest
        };
        total += interest.min(due);
        balance = (balance - (due - interest)).max(Decimal::ZERO);
        if balance <= Decimal::ZERO {
            break;
        }
    }
    total
}

/// Interest saved by prepaying `extra` in month `apply_at_month`.
///
/// Both schedules use the installment of the original loan. The result is
/// never negative and is rounded to cents. A zero `extra`, or a month past
/// the term, saves nothing.
///
/// # Examples
///
/// ```
/// use mortgage_engine::amortization::prepayment::extra_payment_savings;
/// use rust_decimal_macros::dec;
///
/// let saved = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(10_000), 1);
/// assert!(saved > dec!(10_000));
///
/// let none = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(0), 1);
/// assert_eq!(none, dec!(0));
/// ```
pub fn extra_payment_savings(
    principal: Money,
    annual_rate: Rate,
    months: u32,
    extra: Money,
    apply_at_month: u32,
) -> Money {
    let r = monthly_rate(annual_rate);
    let payment = monthly_payment(principal, annual_rate, months);

    let without = baseline_interest(principal, r, payment, months);
    let with = interest_with_prepayment(principal, r, payment, months, extra, apply_at_month);

    round_money((without - with).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_extra_saves_nothing() {
        for month in [1, 12, 200, 360] {
            let saved = extra_payment_savings(dec!(200_000), dec!(0.03), 360, Decimal::ZERO, month);
            assert_eq!(saved, Decimal::ZERO, "month {}", month);
        }
    }

    #[test]
    fn test_larger_prepayment_saves_more() {
        let p1 = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(1000), 1);
        let p5 = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(5000), 1);
        let p10 = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(10_000), 1);
        assert!(p1 > Decimal::ZERO);
        assert!(p5 > p1);
        assert!(p10 > p5);
    }

    #[test]
    fn test_later_prepayment_saves_less() {
        let early = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(5000), 1);
        let late = extra_payment_savings(dec!(200_000), dec!(0.03), 360, dec!(5000), 240);
        assert!(late < early);
    }

    #[test]
    fn test_prepayment_month_interest_uses_prior_balance() {
        // Paying everything off in month 1 still costs month 1's interest
        // on the full balance: 12,000 * 0.01 = 120.
        let principal = dec!(12_000);
        let rate = dec!(0.12);
        let r = monthly_rate(rate);
        let payment = monthly_payment(principal, rate, 12);
        let with = interest_with_prepayment(principal, r, payment, 12, principal, 1);
        assert_eq!(with, dec!(120));
    }

    #[test]
    fn test_zero_rate_saves_nothing() {
        let saved = extra_payment_savings(dec!(60_000), Decimal::ZERO, 120, dec!(5000), 1);
        assert_eq!(saved, Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_past_term() {
        let saved = extra_payment_savings(dec!(60_000), dec!(0.04), 120, dec!(5000), 121);
        assert_eq!(saved, Decimal::ZERO);
    }
}
