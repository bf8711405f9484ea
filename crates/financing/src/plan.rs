//! Financing plan types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A financing plan for a single term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingPlan {
    /// Term length in years
    pub term_years: i64,

    /// Term length in months
    pub term_months: i64,

    /// Monthly payment, rounded to cents
    pub monthly_payment: Decimal,

    /// Total paid over the term (monthly payment times months)
    pub total_amount: Decimal,

    /// Interest portion of the total (total minus financed amount)
    pub interest_amount: Decimal,
}

/// Financing plans across all supported terms for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingSummary {
    /// Vehicle price the quote is based on
    pub car_price: Decimal,

    /// Down payment used (caller-provided or the configured default)
    pub down_payment: Decimal,

    /// Amount financed (price minus down payment)
    pub financed_amount: Decimal,

    /// Annual interest rate as a fraction (0.10 = 10%)
    pub annual_interest_rate: Decimal,

    /// One plan per supported term, shortest first
    pub plans: Vec<FinancingPlan>,
}
