//! Basic mortgage analysis example.
//!
//! Analyzes a fixed-rate mortgage, prints the report, and shows the
//! conversational summary a question-answering service would receive.

use mortgage_engine::analysis::context::summarize_last;
use mortgage_engine::analysis::engine::MortgageAnalyzer;
use mortgage_engine::core::loan::LoanRequest;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  mortgage-engine: Basic Analysis Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let analyzer = MortgageAnalyzer::in_memory();

    // --- Scenario 1: A comfortable fixed-rate loan ---
    println!("━━━ Scenario 1: Fixed 3.00%, 30 years ━━━\n");

    let request = LoanRequest::fixed(dec!(200_000), 30, dec!(3.0))
        .with_monthly_income(dec!(4_500))
        .with_property_value(dec!(320_000));

    match analyzer.analyze(&request) {
        Ok(result) => println!("{}", result),
        Err(e) => println!("Analysis rejected: {}", e),
    }

    // --- Scenario 2: A stretched borrower ---
    println!("━━━ Scenario 2: Stretched borrower ━━━\n");

    let request = LoanRequest::fixed(dec!(130_000), 25, dec!(2.5))
        .with_current_payment(dec!(1_300))
        .with_monthly_income(dec!(3_000))
        .with_property_value(dec!(150_000));

    match analyzer.analyze(&request) {
        Ok(result) => println!("{}", result),
        Err(e) => println!("Analysis rejected: {}", e),
    }

    // --- Scenario 3: Missing rate ---
    println!("━━━ Scenario 3: Fixed loan without its rate ━━━\n");

    let mut request = LoanRequest::fixed(dec!(90_000), 15, dec!(3.0));
    request.nominal_rate = None;
    if let Err(e) = analyzer.analyze(&request) {
        println!("Analysis rejected: {}\n", e);
    }

    // The store still holds scenario 2
    println!("━━━ Context for the assistant ━━━\n");
    println!("{}", summarize_last(analyzer.store()));
}
