pub mod config;
pub mod loan;
pub mod money;
