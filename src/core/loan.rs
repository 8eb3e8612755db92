use crate::core::money::{percent_to_rate, Money, Percent, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest remaining term accepted, in years.
pub const MAX_REMAINING_YEARS: u32 = 100;

/// Largest outstanding principal accepted.
pub const MAX_PRINCIPAL: Money = dec!(1_000_000_000_000_000);

/// Annual rates (%) outside this range are rejected.
pub const MIN_ANNUAL_RATE_PERCENT: Percent = dec!(-100);
pub const MAX_ANNUAL_RATE_PERCENT: Percent = dec!(1000);

/// Errors that stop an analysis before any calculation runs.
///
/// The `Display` text is the message handed back to the caller in the
/// `{ok: false, error}` response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("a fixed-rate mortgage needs the nominal annual rate (%)")]
    MissingFixedRate,
    #[error("a variable-rate mortgage needs both the reference index rate and the spread (%)")]
    MissingVariableRate,
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

/// How the annual rate of the loan is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LoanType {
    /// A single nominal annual rate.
    #[default]
    Fixed,
    /// A reference index rate plus a spread.
    Variable,
}

impl From<String> for LoanType {
    /// Anything other than "variable" (case-insensitive) is a fixed loan.
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for LoanType {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("variable") {
            LoanType::Variable
        } else {
            LoanType::Fixed
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanType::Fixed => write!(f, "fixed"),
            LoanType::Variable => write!(f, "variable"),
        }
    }
}

/// A mortgage as submitted by the borrower.
///
/// Rates are percentages (3.5 = 3.5%). Optional inputs are modelled as
/// `Option` so that "not provided" is never confused with zero.
///
/// # Examples
///
/// ```
/// use mortgage_engine::core::loan::{LoanRequest, LoanType};
/// use rust_decimal_macros::dec;
///
/// let request = LoanRequest::fixed(dec!(200_000), 30, dec!(3.0));
/// let input = request.resolve().unwrap();
///
/// assert_eq!(input.term_months(), 360);
/// assert_eq!(input.annual_rate(), dec!(0.03));
/// assert_eq!(request.loan_type, LoanType::Fixed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Outstanding principal.
    pub principal: Money,
    /// Remaining term in years.
    pub remaining_years: u32,
    #[serde(default)]
    pub loan_type: LoanType,
    /// Nominal annual rate (%) for fixed loans.
    #[serde(default)]
    pub nominal_rate: Option<Percent>,
    /// Reference index rate (%) for variable loans, e.g. Euribor.
    #[serde(default)]
    pub index_rate: Option<Percent>,
    /// Spread over the index (%) for variable loans.
    #[serde(default)]
    pub spread: Option<Percent>,
    /// Installment the borrower actually pays today.
    #[serde(default)]
    pub current_payment: Option<Money>,
    #[serde(default)]
    pub monthly_income: Option<Money>,
    /// Other monthly debt service. Absent counts as zero.
    #[serde(default)]
    pub other_monthly_debt: Option<Money>,
    #[serde(default)]
    pub property_value: Option<Money>,
    /// Nominal annual rate (%) of a competing offer.
    #[serde(default)]
    pub alternative_rate: Option<Percent>,
}

impl LoanRequest {
    /// A fixed-rate request with no optional data.
    pub fn fixed(principal: Money, remaining_years: u32, nominal_rate: Percent) -> Self {
        Self {
            principal,
            remaining_years,
            loan_type: LoanType::Fixed,
            nominal_rate: Some(nominal_rate),
            ..Default::default()
        }
    }

    /// A variable-rate request with no optional data.
    pub fn variable(
        principal: Money,
        remaining_years: u32,
        index_rate: Percent,
        spread: Percent,
    ) -> Self {
        Self {
            principal,
            remaining_years,
            loan_type: LoanType::Variable,
            index_rate: Some(index_rate),
            spread: Some(spread),
            ..Default::default()
        }
    }

    pub fn with_current_payment(mut self, payment: Money) -> Self {
        self.current_payment = Some(payment);
        self
    }

    pub fn with_monthly_income(mut self, income: Money) -> Self {
        self.monthly_income = Some(income);
        self
    }

    pub fn with_other_monthly_debt(mut self, debt: Money) -> Self {
        self.other_monthly_debt = Some(debt);
        self
    }

    pub fn with_property_value(mut self, value: Money) -> Self {
        self.property_value = Some(value);
        self
    }

    pub fn with_alternative_rate(mut self, rate: Percent) -> Self {
        self.alternative_rate = Some(rate);
        self
    }

    /// Validate the request and turn it into calculation inputs.
    ///
    /// The annual rate is derived from the loan type: the nominal rate for
    /// fixed loans, index plus spread for variable loans. Percentages are
    /// converted to fractions here and nowhere else.
    pub fn resolve(&self) -> Result<LoanInput, AnalysisError> {
        if self.principal <= Decimal::ZERO {
            return Err(AnalysisError::InvalidInput {
                field: "principal",
                reason: format!("must be positive, got {}", self.principal),
            });
        }
        if self.principal > MAX_PRINCIPAL {
            return Err(AnalysisError::InvalidInput {
                field: "principal",
                reason: format!("must not exceed {}, got {}", MAX_PRINCIPAL, self.principal),
            });
        }
        if !(1..=MAX_REMAINING_YEARS).contains(&self.remaining_years) {
            return Err(AnalysisError::InvalidInput {
                field: "remaining_years",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_REMAINING_YEARS, self.remaining_years
                ),
            });
        }
        let term_months = self.remaining_years * 12;

        let (annual_percent, rate_label) = match self.loan_type {
            LoanType::Fixed => {
                let nominal = self.nominal_rate.ok_or(AnalysisError::MissingFixedRate)?;
                (nominal, format!("fixed ({:.2}%)", nominal))
            }
            LoanType::Variable => match (self.index_rate, self.spread) {
                (Some(index), Some(spread)) => (
                    index.checked_add(spread).ok_or_else(|| AnalysisError::InvalidInput {
                        field: "spread",
                        reason: "index plus spread is out of range".to_string(),
                    })?,
                    format!("variable (index {:.2}% + {:.2}%)", index, spread),
                ),
                _ => return Err(AnalysisError::MissingVariableRate),
            },
        };
        check_rate("annual_rate", annual_percent)?;
        if let Some(alternative) = self.alternative_rate {
            check_rate("alternative_rate", alternative)?;
        }

        Ok(LoanInput {
            principal: self.principal,
            term_months,
            annual_rate: percent_to_rate(annual_percent),
            rate_label,
            current_payment: self.current_payment,
            monthly_income: self.monthly_income,
            other_monthly_debt: self.other_monthly_debt,
            property_value: self.property_value,
            alternative_annual_rate: self.alternative_rate.map(percent_to_rate),
        })
    }
}

fn check_rate(field: &'static str, percent: Percent) -> Result<(), AnalysisError> {
    if (MIN_ANNUAL_RATE_PERCENT..=MAX_ANNUAL_RATE_PERCENT).contains(&percent) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput {
            field,
            reason: format!(
                "must be between {}% and {}%, got {}%",
                MIN_ANNUAL_RATE_PERCENT, MAX_ANNUAL_RATE_PERCENT, percent
            ),
        })
    }
}

/// Validated calculation inputs. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    principal: Money,
    term_months: u32,
    /// Annual rate as a fraction.
    annual_rate: Rate,
    /// Human-readable description of how the rate was set.
    rate_label: String,
    current_payment: Option<Money>,
    monthly_income: Option<Money>,
    other_monthly_debt: Option<Money>,
    property_value: Option<Money>,
    alternative_annual_rate: Option<Rate>,
}

impl LoanInput {
    // --- Accessors ---

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn rate_label(&self) -> &str {
        &self.rate_label
    }

    pub fn current_payment(&self) -> Option<Money> {
        self.current_payment
    }

    pub fn monthly_income(&self) -> Option<Money> {
        self.monthly_income
    }

    /// Other monthly debt service, zero when not provided.
    pub fn other_monthly_debt(&self) -> Money {
        self.other_monthly_debt.unwrap_or(Decimal::ZERO)
    }

    pub fn property_value(&self) -> Option<Money> {
        self.property_value
    }

    pub fn alternative_annual_rate(&self) -> Option<Rate> {
        self.alternative_annual_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_resolves_rate_fraction() {
        let input = LoanRequest::fixed(dec!(150_000), 25, dec!(3.5))
            .resolve()
            .unwrap();
        assert_eq!(input.annual_rate(), dec!(0.035));
        assert_eq!(input.term_months(), 300);
        assert_eq!(input.rate_label(), "fixed (3.50%)");
    }

    #[test]
    fn test_variable_sums_index_and_spread() {
        let input = LoanRequest::variable(dec!(150_000), 20, dec!(3.6), dec!(0.99))
            .resolve()
            .unwrap();
        assert_eq!(input.annual_rate(), dec!(0.0459));
        assert_eq!(input.rate_label(), "variable (index 3.60% + 0.99%)");
    }

    #[test]
    fn test_fixed_without_rate() {
        let request = LoanRequest {
            principal: dec!(100_000),
            remaining_years: 10,
            ..Default::default()
        };
        assert_eq!(request.resolve(), Err(AnalysisError::MissingFixedRate));
    }

    #[test]
    fn test_variable_without_spread() {
        let mut request = LoanRequest::variable(dec!(100_000), 10, dec!(3.0), dec!(1.0));
        request.spread = None;
        assert_eq!(request.resolve(), Err(AnalysisError::MissingVariableRate));
    }

    #[test]
    fn test_variable_ignores_nominal_rate() {
        let mut request = LoanRequest::variable(dec!(100_000), 10, dec!(3.0), dec!(1.0));
        request.nominal_rate = Some(dec!(9.9));
        assert_eq!(request.resolve().unwrap().annual_rate(), dec!(0.04));
    }

    #[test]
    fn test_non_positive_principal_rejected() {
        let request = LoanRequest::fixed(Decimal::ZERO, 10, dec!(3.0));
        assert!(matches!(
            request.resolve(),
            Err(AnalysisError::InvalidInput { field: "principal", .. })
        ));
    }

    #[test]
    fn test_zero_years_rejected() {
        let request = LoanRequest::fixed(dec!(100_000), 0, dec!(3.0));
        assert!(matches!(
            request.resolve(),
            Err(AnalysisError::InvalidInput { field: "remaining_years", .. })
        ));
    }

    #[test]
    fn test_century_term_accepted() {
        let input = LoanRequest::fixed(dec!(100_000), MAX_REMAINING_YEARS, dec!(3.0))
            .resolve()
            .unwrap();
        assert_eq!(input.term_months(), 1200);
    }

    #[test]
    fn test_implausible_term_rejected() {
        for years in [MAX_REMAINING_YEARS + 1, 200_000, u32::MAX] {
            let request = LoanRequest::fixed(dec!(100_000), years, dec!(3.0));
            assert!(
                matches!(
                    request.resolve(),
                    Err(AnalysisError::InvalidInput { field: "remaining_years", .. })
                ),
                "{} years",
                years
            );
        }
    }

    #[test]
    fn test_excessive_principal_rejected() {
        let request = LoanRequest::fixed(MAX_PRINCIPAL + Decimal::ONE, 30, dec!(3.0));
        assert!(matches!(
            request.resolve(),
            Err(AnalysisError::InvalidInput { field: "principal", .. })
        ));
    }

    #[test]
    fn test_rate_bounds() {
        let high = LoanRequest::fixed(dec!(100_000), 30, dec!(150));
        assert_eq!(high.resolve().unwrap().annual_rate(), dec!(1.5));

        let absurd = LoanRequest::fixed(dec!(100_000), 30, dec!(1000.01));
        assert!(matches!(
            absurd.resolve(),
            Err(AnalysisError::InvalidInput { field: "annual_rate", .. })
        ));

        let offer = LoanRequest::fixed(dec!(100_000), 30, dec!(3.0))
            .with_alternative_rate(Decimal::MAX);
        assert!(matches!(
            offer.resolve(),
            Err(AnalysisError::InvalidInput { field: "alternative_rate", .. })
        ));

        let overflow = LoanRequest::variable(dec!(100_000), 30, Decimal::MAX, Decimal::MAX);
        assert!(matches!(
            overflow.resolve(),
            Err(AnalysisError::InvalidInput { field: "spread", .. })
        ));
    }

    #[test]
    fn test_loan_type_parsing() {
        assert_eq!(LoanType::from("Variable"), LoanType::Variable);
        assert_eq!(LoanType::from("FIJO"), LoanType::Fixed);
        assert_eq!(LoanType::from("fixed"), LoanType::Fixed);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "principal": "180000",
            "remaining_years": 22,
            "loan_type": "variable",
            "index_rate": "2.5",
            "spread": "0.8",
            "monthly_income": "3200"
        }"#;
        let request: LoanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.loan_type, LoanType::Variable);
        assert_eq!(request.property_value, None);
        assert_eq!(request.monthly_income, Some(dec!(3200)));
        assert_eq!(request.resolve().unwrap().annual_rate(), dec!(0.033));
    }

    #[test]
    fn test_other_debt_defaults_to_zero() {
        let input = LoanRequest::fixed(dec!(100_000), 10, dec!(3.0))
            .resolve()
            .unwrap();
        assert_eq!(input.other_monthly_debt(), Decimal::ZERO);
    }
}
