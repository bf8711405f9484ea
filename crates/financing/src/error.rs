//! Financing error types

use thiserror::Error;

/// Errors produced while validating a financing request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinancingError {
    /// Requested term is not one we offer
    #[error("term must be 3, 4, 5, or 6 years")]
    InvalidTerm { term_years: i64 },

    /// Down payment must leave something to finance
    #[error("down payment cannot be greater than or equal to vehicle price")]
    DownPaymentTooHigh,
}

impl From<FinancingError> for car_agent_core::Error {
    fn from(err: FinancingError) -> Self {
        car_agent_core::Error::Financing(err.to_string())
    }
}
