//! # mortgage-engine
//!
//! Mortgage amortization and risk analysis.
//!
//! Given a borrower's outstanding principal, remaining term and rate, this
//! engine computes the installment, the amortization path, the interest
//! saved by prepaying, the installment under rate shocks, and the
//! debt-to-income / loan-to-value ratios with their risk warnings. The last
//! analysis is kept in a store so that a question-answering service can
//! use it as conversational context.
//!
//! ## Architecture
//!
//! - **core** — Loan requests, validation, configuration, decimal conventions
//! - **amortization** — Annuity payment, schedule snapshots, prepayment savings
//! - **risk** — Rate stress testing, affordability ratios and warnings
//! - **analysis** — Orchestration, result store, conversational summary

pub mod amortization;
pub mod analysis;
pub mod core;
pub mod risk;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::payment::monthly_payment;
    pub use crate::analysis::context::summarize;
    pub use crate::analysis::engine::{
        analyze_loan, AnalysisResponse, AnalysisResult, MortgageAnalyzer,
    };
    pub use crate::analysis::store::{AnalysisStore, InMemoryAnalysisStore};
    pub use crate::core::config::AnalysisConfig;
    pub use crate::core::loan::{AnalysisError, LoanInput, LoanRequest, LoanType};
}
