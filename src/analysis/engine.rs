use crate::amortization::payment::{monthly_payment, remaining_interest};
use crate::amortization::prepayment::extra_payment_savings;
use crate::amortization::schedule::{amortization_summary, AmortizationSnapshot};
use crate::analysis::store::{AnalysisStore, InMemoryAnalysisStore};
use crate::core::config::AnalysisConfig;
use crate::core::loan::{AnalysisError, LoanInput, LoanRequest};
use crate::core::money::{rate_to_percent, round_money, round_rate, Money, Percent};
use crate::risk::affordability::{debt_to_income, loan_to_value, risk_warnings};
use crate::risk::stress_test::{stress_test, StressTestResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Echo of the analyzed loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: Money,
    pub term_months: u32,
    /// Annual rate in percent, 3 decimals.
    pub annual_rate: Percent,
    pub rate_label: String,
}

/// Installment and affordability figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMetrics {
    /// The installment used for affordability: the borrower's current
    /// payment if given, otherwise the computed one.
    pub effective_payment: Money,
    /// Installment computed from principal, rate and term.
    pub estimated_payment: Money,
    /// Interest left to pay at the computed installment.
    pub remaining_interest: Money,
    /// Debt-to-income in percent, `None` when no income was given.
    pub dti: Option<Percent>,
    /// Loan-to-value in percent, `None` when no property value was given.
    pub ltv: Option<Percent>,
}

/// Interest saved by one prepayment amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentSavings {
    pub amount: Money,
    pub apply_at_month: u32,
    pub interest_saved: Money,
}

/// The current loan set against a competing rate offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    /// Offered annual rate in percent, 3 decimals.
    pub alternative_rate: Percent,
    pub alternative_payment: Money,
    /// Offered installment minus the current (rounded) base installment.
    pub payment_difference: Money,
    pub alternative_interest: Money,
    /// Current remaining interest minus the offer's. Negative when the
    /// offer costs more.
    pub interest_savings: Money,
}

/// Everything computed for one loan.
///
/// Built once by [`analyze_loan`] and never mutated; the store hands out
/// shared snapshots of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub input: LoanSummary,
    pub metrics: PaymentMetrics,
    pub stress_test: StressTestResult,
    pub extra_payments: Vec<ExtraPaymentSavings>,
    pub amortization: Vec<AmortizationSnapshot>,
    pub comparison: Option<RateComparison>,
    pub warnings: Vec<String>,
}

/// Run every calculation for a validated loan.
///
/// # Algorithm
///
/// 1. Computed installment; effective installment = current payment if given.
/// 2. Remaining interest and amortization snapshots at the configured milestones.
/// 3. DTI on effective installment plus other debt; LTV on principal.
/// 4. Rate stress scenarios and prepayment savings.
/// 5. Comparison against the alternative rate, if one was offered.
/// 6. Risk warnings from the ratios.
pub fn analyze_loan(input: &LoanInput, config: &AnalysisConfig) -> AnalysisResult {
    let principal = input.principal();
    let rate = input.annual_rate();
    let months = input.term_months();

    let estimated_payment = monthly_payment(principal, rate, months);
    let effective_payment = input.current_payment().unwrap_or(estimated_payment);
    let interest = remaining_interest(principal, rate, months);

    let amortization = amortization_summary(principal, rate, months, &config.milestones);

    let dti = debt_to_income(
        effective_payment.saturating_add(input.other_monthly_debt()),
        input.monthly_income(),
    );
    let ltv = loan_to_value(principal, input.property_value());

    let stress = stress_test(principal, rate, months, &config.rate_shocks);

    let extra_payments = config
        .extra_payments
        .iter()
        .map(|&amount| ExtraPaymentSavings {
            amount,
            apply_at_month: config.extra_payment_month,
            interest_saved: extra_payment_savings(
                principal,
                rate,
                months,
                amount,
                config.extra_payment_month,
            ),
        })
        .collect();

    let comparison = input.alternative_annual_rate().map(|alt_rate| {
        let alt_payment = monthly_payment(principal, alt_rate, months);
        let alt_interest = remaining_interest(principal, alt_rate, months);
        RateComparison {
            alternative_rate: round_rate(rate_to_percent(alt_rate)),
            alternative_payment: round_money(alt_payment),
            payment_difference: round_money(alt_payment - stress.base_payment),
            alternative_interest: round_money(alt_interest),
            interest_savings: round_money(interest - alt_interest),
        }
    });

    let warnings = risk_warnings(dti, ltv, &config.thresholds)
        .iter()
        .map(|w| w.to_string())
        .collect();

    AnalysisResult {
        id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        input: LoanSummary {
            principal,
            term_months: months,
            annual_rate: round_rate(rate_to_percent(rate)),
            rate_label: input.rate_label().to_string(),
        },
        metrics: PaymentMetrics {
            effective_payment: round_money(effective_payment),
            estimated_payment: round_money(estimated_payment),
            remaining_interest: round_money(interest),
            dti,
            ltv,
        },
        stress_test: stress,
        extra_payments,
        amortization,
        comparison,
        warnings,
    }
}

/// Runs analyses and keeps the latest one in a store.
///
/// # Examples
///
/// ```
/// use mortgage_engine::analysis::engine::MortgageAnalyzer;
/// use mortgage_engine::core::loan::LoanRequest;
/// use rust_decimal_macros::dec;
///
/// let analyzer = MortgageAnalyzer::in_memory();
/// assert!(analyzer.last_analysis().is_none());
///
/// let request = LoanRequest::fixed(dec!(200_000), 30, dec!(3.0));
/// let result = analyzer.analyze(&request).unwrap();
/// assert_eq!(result.metrics.estimated_payment, dec!(843.21));
/// assert_eq!(analyzer.last_analysis().unwrap().id, result.id);
/// ```
#[derive(Debug)]
pub struct MortgageAnalyzer<S = InMemoryAnalysisStore> {
    config: AnalysisConfig,
    store: S,
}

impl MortgageAnalyzer<InMemoryAnalysisStore> {
    /// Default configuration with a process-local store.
    pub fn in_memory() -> Self {
        Self::new(AnalysisConfig::default(), InMemoryAnalysisStore::new())
    }
}

impl<S: AnalysisStore> MortgageAnalyzer<S> {
    pub fn new(config: AnalysisConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and analyze a request.
    ///
    /// On success the result replaces the stored analysis. A validation
    /// error leaves the store untouched.
    pub fn analyze(&self, request: &LoanRequest) -> Result<Arc<AnalysisResult>, AnalysisError> {
        log::info!(
            "analyzing mortgage: type={}, principal={}, years={}",
            request.loan_type,
            request.principal,
            request.remaining_years
        );

        let input = request.resolve().map_err(|e| {
            log::warn!("rejected mortgage analysis: {}", e);
            e
        })?;

        let result = Arc::new(analyze_loan(&input, &self.config));
        self.store.replace(Arc::clone(&result));

        log::info!(
            "analysis {} completed: payment={}, warnings={}",
            result.id,
            result.metrics.effective_payment,
            result.warnings.len()
        );
        Ok(result)
    }

    /// The latest successful analysis, if any.
    pub fn last_analysis(&self) -> Option<Arc<AnalysisResult>> {
        self.store.last()
    }
}

/// Wire shape of an analysis outcome.
///
/// Success serializes as `{"ok": true, ...result}`, failure as
/// `{"ok": false, "error": "..."}`. Callers check `ok` instead of relying
/// on transport errors.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse<'a> {
    pub ok: bool,
    #[serde(flatten)]
    pub result: Option<&'a AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> AnalysisResponse<'a> {
    pub fn from_outcome(outcome: &'a Result<Arc<AnalysisResult>, AnalysisError>) -> Self {
        match outcome {
            Ok(result) => Self {
                ok: true,
                result: Some(result.as_ref()),
                error: None,
            },
            Err(e) => Self {
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl std::fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Mortgage Analysis ===")?;
        writeln!(f, "Principal:          {}", self.input.principal)?;
        writeln!(f, "Term:               {} months", self.input.term_months)?;
        writeln!(f, "Rate:               {}", self.input.rate_label)?;

        writeln!(f, "\n--- Payments ---")?;
        writeln!(f, "  Effective:        {}", self.metrics.effective_payment)?;
        writeln!(f, "  Estimated:        {}", self.metrics.estimated_payment)?;
        writeln!(f, "  Remaining int.:   {}", self.metrics.remaining_interest)?;
        match self.metrics.dti {
            Some(dti) => writeln!(f, "  DTI:              {}%", dti)?,
            None => writeln!(f, "  DTI:              n/a")?,
        }
        match self.metrics.ltv {
            Some(ltv) => writeln!(f, "  LTV:              {}%", ltv)?,
            None => writeln!(f, "  LTV:              n/a")?,
        }

        writeln!(f, "\n--- Rate Stress (base {}) ---", self.stress_test.base_payment)?;
        for s in &self.stress_test.scenarios {
            writeln!(
                f,
                "  {:+}pp -> {}%: {} ({:+})",
                s.delta_points, s.resulting_rate, s.payment, s.difference
            )?;
        }

        writeln!(f, "\n--- Prepayment Savings ---")?;
        for e in &self.extra_payments {
            writeln!(
                f,
                "  {} in month {}: {} interest saved",
                e.amount, e.apply_at_month, e.interest_saved
            )?;
        }

        writeln!(f, "\n--- Amortization ---")?;
        for s in &self.amortization {
            writeln!(
                f,
                "  Month {:>4}: balance {}, interest to date {}",
                s.month, s.balance, s.cumulative_interest
            )?;
        }

        if let Some(c) = &self.comparison {
            writeln!(f, "\n--- Alternative Offer ({}%) ---", c.alternative_rate)?;
            writeln!(f, "  Payment:          {} ({:+})", c.alternative_payment, c.payment_difference)?;
            writeln!(f, "  Interest:         {}", c.alternative_interest)?;
            writeln!(f, "  Interest saved:   {}", c.interest_savings)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for w in &self.warnings {
                writeln!(f, "  ! {}", w)?;
            }
        }
        Ok(())
    }
}
