//! Vehicle financing for the car sales agent
//!
//! This crate provides the financing math behind payment quotes:
//! - `FinancingEngine` with the standard amortization formula
//! - `FinancingPlan` / `FinancingSummary` result types
//! - Validation of terms and down payments
//!
//! All money is `rust_decimal::Decimal`; quoted amounts are rounded to
//! cents, half away from zero.

pub mod engine;
pub mod error;
pub mod plan;

pub use engine::FinancingEngine;
pub use error::FinancingError;
pub use plan::{FinancingPlan, FinancingSummary};
