//! Decimal aliases and the rounding conventions used at presentation
//! boundaries.
//!
//! Calculations run at full decimal precision; values are only rounded
//! when they are placed into a result record. Rounding is banker's rounding
//! (half to even).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency amounts.
pub type Money = Decimal;

/// Rates expressed as fractions (0.035 = 3.5%).
pub type Rate = Decimal;

/// Ratios and rates expressed as percentages (3.5 = 3.5%).
pub type Percent = Decimal;

pub const HUNDRED: Decimal = dec!(100);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round a currency amount (or ratio percentage) to 2 decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Round a rate percentage to 3 decimal places.
pub fn round_rate(percent: Decimal) -> Decimal {
    percent.round_dp(3)
}

/// Convert a percentage (3.5) into a fraction (0.035).
pub fn percent_to_rate(percent: Percent) -> Rate {
    percent / HUNDRED
}

/// Convert a fraction (0.035) into a percentage (3.5).
pub fn rate_to_percent(rate: Rate) -> Percent {
    rate * HUNDRED
}

/// Monthly rate for an annual nominal rate.
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_PER_YEAR
}
