//! Conversational context for the question-answering collaborator.
//!
//! The answer generator is given a short plain-language description of the
//! borrower's mortgage instead of the raw analysis record.

use crate::analysis::engine::AnalysisResult;
use crate::analysis::store::AnalysisStore;

/// Returned when no analysis has been run yet.
pub const NO_ANALYSIS: &str = "No mortgage data available for this user.";

/// Describe an analysis in a few sentences, warnings last.
///
/// # Examples
///
/// ```
/// use mortgage_engine::analysis::context::{summarize, NO_ANALYSIS};
/// use mortgage_engine::analysis::engine::MortgageAnalyzer;
/// use mortgage_engine::core::loan::LoanRequest;
/// use rust_decimal_macros::dec;
///
/// let analyzer = MortgageAnalyzer::in_memory();
/// assert_eq!(summarize(analyzer.last_analysis().as_deref()), NO_ANALYSIS);
///
/// analyzer.analyze(&LoanRequest::fixed(dec!(200_000), 30, dec!(3.0))).unwrap();
/// let text = summarize(analyzer.last_analysis().as_deref());
/// assert!(text.contains("843.21"));
/// ```
pub fn summarize(analysis: Option<&AnalysisResult>) -> String {
    let Some(analysis) = analysis else {
        return NO_ANALYSIS.to_string();
    };

    let input = &analysis.input;
    let metrics = &analysis.metrics;
    let years = input.term_months / 12;

    let mut text = format!(
        "You have a mortgage of {} with {} years remaining at a {} rate. \
         Your effective monthly payment is about {}, and the interest left \
         to pay is estimated at {}.",
        input.principal, years, input.rate_label, metrics.effective_payment, metrics.remaining_interest
    );

    if !analysis.warnings.is_empty() {
        text.push_str(" Also consider the following: ");
        text.push_str(&analysis.warnings.join("; "));
    }
    text
}

/// Summary of whatever analysis the store currently holds.
pub fn summarize_last<S: AnalysisStore + ?Sized>(store: &S) -> String {
    summarize(store.last().as_deref())
}
