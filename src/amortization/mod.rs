pub mod payment;
pub mod prepayment;
pub mod schedule;
