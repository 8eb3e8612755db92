use crate::core::config::RiskThresholds;
use crate::core::money::{round_money, Money, Percent, HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `numerator / denominator` as a percentage, or `None` when the
/// denominator is missing or not positive. Ratios beyond the decimal range
/// saturate.
fn ratio_percent(numerator: Money, denominator: Option<Money>) -> Option<Percent> {
    let denominator = denominator.filter(|d| *d > Decimal::ZERO)?;
    let ratio = numerator
        .checked_div(denominator)
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(if numerator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
    Some(round_money(ratio))
}

/// Debt-to-income ratio in percent.
///
/// `None` means "not applicable": no income was given, or it is not
/// positive. That is not an error and never raises a warning.
///
/// # Examples
///
/// ```
/// use mortgage_engine::risk::affordability::debt_to_income;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(debt_to_income(dec!(1300), Some(dec!(3000))), Some(dec!(43.33)));
/// assert_eq!(debt_to_income(dec!(1300), None), None);
/// ```
pub fn debt_to_income(monthly_debt_service: Money, monthly_income: Option<Money>) -> Option<Percent> {
    ratio_percent(monthly_debt_service, monthly_income)
}

/// Loan-to-value ratio in percent. `None` when the property value is
/// missing or not positive.
pub fn loan_to_value(outstanding_principal: Money, property_value: Option<Money>) -> Option<Percent> {
    ratio_percent(outstanding_principal, property_value)
}

/// A risk flag raised by the affordability ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWarning {
    HighDebtToIncome,
    ModerateDebtToIncome,
    HighLeverage,
    ModerateLeverage,
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RiskWarning::HighDebtToIncome => "High DTI: risk of over-indebtedness.",
            RiskWarning::ModerateDebtToIncome => {
                "Moderate DTI: keep an eye on your financial cushion."
            }
            RiskWarning::HighLeverage => {
                "High LTV: heavy leverage; switching lenders may be harder."
            }
            RiskWarning::ModerateLeverage => {
                "Moderate LTV: reasonable margin, but watch out for falling property values."
            }
        };
        f.write_str(text)
    }
}

/// Warnings for the given ratios, DTI first.
///
/// At most one DTI and one LTV warning fire; the high band takes precedence
/// over the moderate one. DTI bands are inclusive, LTV bands exclusive.
pub fn risk_warnings(
    dti: Option<Percent>,
    ltv: Option<Percent>,
    thresholds: &RiskThresholds,
) -> Vec<RiskWarning> {
    let mut warnings = Vec::new();

    if let Some(dti) = dti {
        if dti >= thresholds.dti_high {
            warnings.push(RiskWarning::HighDebtToIncome);
        } else if dti >= thresholds.dti_moderate {
            warnings.push(RiskWarning::ModerateDebtToIncome);
        }
    }

    if let Some(ltv) = ltv {
        if ltv > thresholds.ltv_high {
            warnings.push(RiskWarning::HighLeverage);
        } else if ltv > thresholds.ltv_moderate {
            warnings.push(RiskWarning::ModerateLeverage);
        }
    }

    warnings
}
