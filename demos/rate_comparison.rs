//! Variable-rate stress test and lender comparison example.
//!
//! Shows how an index increase moves the installment of a variable-rate
//! mortgage, and whether switching to a competing fixed offer pays off.

use mortgage_engine::analysis::engine::MortgageAnalyzer;
use mortgage_engine::analysis::store::InMemoryAnalysisStore;
use mortgage_engine::core::config::AnalysisConfig;
use mortgage_engine::core::loan::LoanRequest;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  mortgage-engine: Rate Comparison Example║");
    println!("╚══════════════════════════════════════════╝\n");

    let config = AnalysisConfig {
        rate_shocks: vec![dec!(0.005), dec!(0.01), dec!(0.02), dec!(0.03)],
        ..Default::default()
    };
    let analyzer = MortgageAnalyzer::new(config, InMemoryAnalysisStore::new());

    let request = LoanRequest::variable(dec!(180_000), 22, dec!(3.6), dec!(0.99))
        .with_alternative_rate(dec!(3.2));

    let result = match analyzer.analyze(&request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Analysis rejected: {}", e);
            return;
        }
    };

    println!("━━━ Installment under rate shocks ━━━\n");
    println!("  Base:  {}", result.stress_test.base_payment);
    for s in &result.stress_test.scenarios {
        println!(
            "  {:>6}%  {:>10}  ({:+})",
            s.resulting_rate, s.payment, s.difference
        );
    }

    if let Some(c) = &result.comparison {
        println!("\n━━━ Switching to {}% ━━━\n", c.alternative_rate);
        println!("  New installment:    {}", c.alternative_payment);
        println!("  Monthly change:     {:+}", c.payment_difference);
        println!("  Interest saved:     {}", c.interest_savings);
        let verdict = if c.interest_savings > dec!(0) {
            "worth considering"
        } else {
            "not worth it"
        };
        println!("  Verdict:            {}", verdict);
    }
}
