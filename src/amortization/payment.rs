//! Annuity payment formula.

use crate::core::money::{monthly_rate, Money, Rate};
use rust_decimal::Decimal;

/// `(1 + r)^n` by repeated multiplication.
///
/// Returns `None` if the power leaves the decimal range.
fn compound_factor(monthly_rate: Rate, months: u32) -> Option<Decimal> {
    let factor = Decimal::ONE + monthly_rate;
    let mut result = Decimal::ONE;
    for _ in 0..months {
        result = result.checked_mul(factor)?;
    }
    Some(result)
}

/// Fixed monthly installment that repays `principal` over `months`.
///
/// ```text
/// payment = P * r * (1 + r)^n / ((1 + r)^n - 1),   r = annual_rate / 12
/// ```
///
/// Evaluated as `P * r / (1 - (1 + r)^-n)` so intermediate values stay
/// below the payment itself. A zero or negative rate amortizes in a
/// straight line (`P / n`). If `(1 + r)^n` overflows, the payment is the
/// formula's limit `P * r`. A zero term yields a zero payment.
///
/// # Examples
///
/// ```
/// use mortgage_engine::amortization::payment::monthly_payment;
/// use rust_decimal_macros::dec;
///
/// let payment = monthly_payment(dec!(200_000), dec!(0.03), 360);
/// assert_eq!(payment.round_dp(2), dec!(843.21));
///
/// assert_eq!(monthly_payment(dec!(120_000), dec!(0), 120), dec!(1000));
/// ```
pub fn monthly_payment(principal: Money, annual_rate: Rate, months: u32) -> Money {
    if months == 0 {
        return Decimal::ZERO;
    }
    let r = monthly_rate(annual_rate);
    if r <= Decimal::ZERO {
        return principal / Decimal::from(months);
    }

    let interest_only = principal.saturating_mul(r);
    match compound_factor(r, months) {
        Some(compound) if compound > Decimal::ONE => {
            let amortized = Decimal::ONE - Decimal::ONE / compound;
            if amortized > Decimal::ZERO {
                interest_only
                    .checked_div(amortized)
                    .unwrap_or(interest_only)
            } else {
                principal / Decimal::from(months)
            }
        }
        // The rate is too small to move (1 + r)^n off 1 at this precision.
        Some(_) => principal / Decimal::from(months),
        None => interest_only,
    }
}

/// Interest still to be paid if the loan runs to term at the computed
/// installment: `payment * n - P`, floored at zero.
pub fn remaining_interest(principal: Money, annual_rate: Rate, months: u32) -> Money {
    let total = monthly_payment(principal, annual_rate, months).saturating_mul(Decimal::from(months));
    (total - principal).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_payment() {
        let payment = monthly_payment(dec!(200_000), dec!(0.03), 360);
        assert_eq!(payment.round_dp(2), dec!(843.21));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(dec!(90_000), Decimal::ZERO, 300), dec!(300));
    }

    #[test]
    fn test_negative_rate_is_straight_line() {
        assert_eq!(monthly_payment(dec!(90_000), dec!(-0.005), 300), dec!(300));
    }

    #[test]
    fn test_single_month_repays_with_interest() {
        // One period: P * (1 + r)
        let payment = monthly_payment(dec!(1200), dec!(0.12), 1);
        assert_eq!(payment.round_dp(10), dec!(1212));
    }

    #[test]
    fn test_zero_term() {
        assert_eq!(monthly_payment(dec!(1000), dec!(0.03), 0), Decimal::ZERO);
    }

    #[test]
    fn test_overflow_falls_back_to_interest_only() {
        // (1 + 10)^480 is far outside the decimal range
        let payment = monthly_payment(dec!(1000), dec!(120), 480);
        assert_eq!(payment, dec!(10000));
    }

    #[test]
    fn test_high_rate_with_representable_factor() {
        // 1.125^480 fits in a Decimal but P * r * (1 + r)^n does not
        let payment = monthly_payment(dec!(1_000_000), dec!(1.5), 480);
        assert_eq!(payment.round_dp(2), dec!(125000));
    }

    #[test]
    fn test_moderate_rate_matches_annuity() {
        // 60% over 40 years on 5M: close to interest-only but still amortizing
        let payment = monthly_payment(dec!(5_000_000), dec!(0.6), 480);
        assert!(payment > dec!(250_000));
        assert!(payment < dec!(250_001));
    }

    #[test]
    fn test_remaining_interest_reference() {
        let interest = remaining_interest(dec!(200_000), dec!(0.03), 360);
        assert!(
            interest > dec!(103_553) && interest < dec!(103_556),
            "interest = {}",
            interest
        );
    }

    #[test]
    fn test_remaining_interest_zero_rate() {
        assert_eq!(remaining_interest(dec!(50_000), Decimal::ZERO, 100), Decimal::ZERO);
    }
}
