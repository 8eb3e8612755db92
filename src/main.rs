//! mortgage-engine CLI
//!
//! Analyze a mortgage from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Text report
//! mortgage-engine analyze --input loan.json
//!
//! # JSON response ({"ok": true, ...} or {"ok": false, "error": ...})
//! mortgage-engine analyze --input loan.json --format json
//!
//! # Conversational summary of the analysis
//! mortgage-engine context --input loan.json
//! ```

use mortgage_engine::analysis::context::summarize_last;
use mortgage_engine::analysis::engine::{AnalysisResponse, MortgageAnalyzer};
use mortgage_engine::analysis::store::InMemoryAnalysisStore;
use mortgage_engine::core::config::AnalysisConfig;
use mortgage_engine::core::loan::LoanRequest;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"mortgage-engine — mortgage amortization and risk analysis

USAGE:
    mortgage-engine <COMMAND> [OPTIONS]

COMMANDS:
    analyze     Analyze a mortgage and print the report
    context     Analyze a mortgage and print its conversational summary
    help        Show this message

OPTIONS:
    --input <FILE>      Path to JSON loan request
    --config <FILE>     Path to JSON analysis config (optional)
    --format <FORMAT>   Output format for analyze: text (default) or json

ENVIRONMENT:
    RUST_LOG            Log filter (default: info)

EXAMPLES:
    mortgage-engine analyze --input loan.json
    mortgage-engine analyze --input loan.json --format json
    mortgage-engine context --input loan.json --config config.json"#
    );
}

const EXPECTED_FORMAT: &str = r#"{
  "principal": "200000",
  "remaining_years": 30,
  "loan_type": "fixed",
  "nominal_rate": "3.0",
  "monthly_income": "3000",
  "property_value": "250000"
}"#;

struct Options {
    input_path: String,
    config_path: Option<String>,
    format: String,
}

fn parse_options(args: &[String]) -> Options {
    let mut input_path = None;
    let mut config_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--config requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    Options {
        input_path,
        config_path,
        format,
    }
}

fn load_request(path: &str) -> LoanRequest {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!("{}", EXPECTED_FORMAT);
        process::exit(1);
    })
}

fn load_config(path: Option<&str>) -> AnalysisConfig {
    match path {
        Some(path) => AnalysisConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => AnalysisConfig::default(),
    }
}

fn build_analyzer(options: &Options) -> MortgageAnalyzer<InMemoryAnalysisStore> {
    let config = load_config(options.config_path.as_deref());
    MortgageAnalyzer::new(config, InMemoryAnalysisStore::new())
}

fn cmd_analyze(args: &[String]) {
    let options = parse_options(args);
    let request = load_request(&options.input_path);
    let analyzer = build_analyzer(&options);

    let outcome = analyzer.analyze(&request);

    if options.format == "json" {
        let response = AnalysisResponse::from_outcome(&outcome);
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing response: {}", e);
                process::exit(1);
            }
        }
        if !response.ok {
            process::exit(1);
        }
    } else {
        match outcome {
            Ok(result) => println!("{}", result),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn cmd_context(args: &[String]) {
    let options = parse_options(args);
    let request = load_request(&options.input_path);
    let analyzer = build_analyzer(&options);

    if let Err(e) = analyzer.analyze(&request) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    println!("{}", summarize_last(analyzer.store()));
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "analyze" => cmd_analyze(rest),
        "context" => cmd_context(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
