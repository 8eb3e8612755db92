use crate::amortization::schedule::DEFAULT_MILESTONES;
use crate::core::money::{Money, Percent, Rate};
use crate::risk::stress_test::DEFAULT_RATE_SHOCKS;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest rate shock accepted, as a fraction (1 = 100pp).
pub const MAX_RATE_SHOCK: Rate = Decimal::ONE;

/// Errors arising while loading an [`AnalysisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Business thresholds that turn affordability ratios into warnings.
///
/// All values are percentages. A DTI at or above `dti_high` is high,
/// at or above `dti_moderate` moderate. An LTV strictly above `ltv_high`
/// is high, strictly above `ltv_moderate` moderate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub dti_high: Percent,
    pub dti_moderate: Percent,
    pub ltv_high: Percent,
    pub ltv_moderate: Percent,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            dti_high: dec!(40),
            dti_moderate: dec!(35),
            ltv_high: dec!(80),
            ltv_moderate: dec!(70),
        }
    }
}

/// Parameters of a mortgage analysis.
///
/// The defaults reproduce the standard report: snapshots at years 1, 5
/// and 10, rate shocks of +1 and +2 percentage points, and one-off
/// prepayments of 1,000 / 5,000 / 10,000 applied in the first month.
///
/// # Examples
///
/// ```
/// use mortgage_engine::core::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json_str(r#"{ "milestones": [24, 36] }"#).unwrap();
/// assert_eq!(config.milestones, vec![24, 36]);
/// assert_eq!(config.extra_payment_month, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Months at which amortization snapshots are kept. The final month
    /// is always added.
    pub milestones: Vec<u32>,
    /// Rate increases to stress, as fractions (0.01 = +1pp).
    pub rate_shocks: Vec<Rate>,
    /// One-off prepayment amounts to evaluate.
    pub extra_payments: Vec<Money>,
    /// Month in which the prepayment is made (1-based).
    pub extra_payment_month: u32,
    pub thresholds: RiskThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            milestones: DEFAULT_MILESTONES.to_vec(),
            rate_shocks: DEFAULT_RATE_SHOCKS.to_vec(),
            extra_payments: vec![dec!(1000), dec!(5000), dec!(10000)],
            extra_payment_month: 1,
            thresholds: RiskThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.extra_payment_month == 0 {
            return Err(ConfigError::Invalid(
                "extra_payment_month is 1-based and must be at least 1".to_string(),
            ));
        }
        if let Some(shock) = self.rate_shocks.iter().find(|s| s.abs() > MAX_RATE_SHOCK) {
            return Err(ConfigError::Invalid(format!(
                "rate shock {} exceeds {} in absolute value",
                shock, MAX_RATE_SHOCK
            )));
        }
        if let Some(amount) = self.extra_payments.iter().find(|a| a.is_sign_negative()) {
            return Err(ConfigError::Invalid(format!(
                "extra payment {} is negative",
                amount
            )));
        }
        if self.thresholds.dti_moderate > self.thresholds.dti_high {
            return Err(ConfigError::Invalid(format!(
                "dti_moderate ({}) exceeds dti_high ({})",
                self.thresholds.dti_moderate, self.thresholds.dti_high
            )));
        }
        if self.thresholds.ltv_moderate > self.thresholds.ltv_high {
            return Err(ConfigError::Invalid(format!(
                "ltv_moderate ({}) exceeds ltv_high ({})",
                self.thresholds.ltv_moderate, self.thresholds.ltv_high
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.milestones, vec![12, 60, 120]);
        assert_eq!(config.rate_shocks, vec![dec!(0.01), dec!(0.02)]);
        assert_eq!(config.extra_payments.len(), 3);
        assert_eq!(config.thresholds.dti_high, dec!(40));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AnalysisConfig::from_json_str(r#"{ "thresholds": { "ltv_high": "90" } }"#).unwrap();
        assert_eq!(config.thresholds.ltv_high, dec!(90));
        assert_eq!(config.thresholds.ltv_moderate, dec!(70));
        assert_eq!(config.milestones, vec![12, 60, 120]);
    }

    #[test]
    fn test_zero_prepayment_month_rejected() {
        let result = AnalysisConfig::from_json_str(r#"{ "extra_payment_month": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_defaults_follow_module_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.milestones, DEFAULT_MILESTONES.to_vec());
        assert_eq!(config.rate_shocks, DEFAULT_RATE_SHOCKS.to_vec());
    }

    #[test]
    fn test_out_of_range_shock_rejected() {
        let result = AnalysisConfig::from_json_str(r#"{ "rate_shocks": ["0.01", "-1.5"] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let ok = AnalysisConfig::from_json_str(r#"{ "rate_shocks": ["-1", "1"] }"#);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_negative_extra_payment_rejected() {
        let result = AnalysisConfig::from_json_str(r#"{ "extra_payments": ["1000", "-5"] }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let result =
            AnalysisConfig::from_json_str(r#"{ "thresholds": { "dti_moderate": "45" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json() {
        let result = AnalysisConfig::from_json_str("{ milestones: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AnalysisConfig::from_json_file("/nonexistent/mortgage-config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
