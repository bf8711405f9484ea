//! Amortization engine
//!
//! Monthly payments use the standard amortization formula:
//!
//! payment = P × r × (1 + r)^n / [(1 + r)^n - 1]
//!
//! where P is the financed amount, r the monthly rate, and n the term in
//! months. Amounts stay in `Decimal` end to end; only the `(1 + r)^n`
//! growth factor goes through f64, since `Decimal` has no exponentiation
//! in the feature set we use.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use car_agent_config::constants::financing::{MONTHS_PER_YEAR, SUPPORTED_TERM_YEARS};
use car_agent_config::FinancingConfig;

use crate::error::FinancingError;
use crate::plan::{FinancingPlan, FinancingSummary};

/// Round a money amount to cents, half away from zero
fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Vehicle financing engine
///
/// Holds the financing configuration explicitly; nothing here reads
/// defaults from global state.
#[derive(Debug, Clone)]
pub struct FinancingEngine {
    config: FinancingConfig,
}

impl FinancingEngine {
    /// Create an engine with the given configuration
    pub fn new(config: FinancingConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &FinancingConfig {
        &self.config
    }

    /// Calculate the monthly payment for a financed amount
    ///
    /// `annual_rate` is a fraction (0.10 = 10%). Degenerate inputs do not
    /// error: a non-positive principal or term yields zero, and a
    /// non-positive rate yields the straight-line principal / months.
    /// The result is rounded to cents, half away from zero.
    pub fn calculate_monthly_payment(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        months: i64,
    ) -> Decimal {
        if months <= 0 || principal <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let months_dec = Decimal::from(months);
        let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);

        if monthly_rate <= Decimal::ZERO {
            return to_cents(principal / months_dec);
        }

        // Growth factor through f64; the payment is re-quantized below.
        // Rates tiny enough to collapse the factor to 1.0 fall back to
        // the straight-line payment rather than divide by zero.
        let factor_f64 = match (Decimal::ONE + monthly_rate).to_f64() {
            Some(base) => base.powi(months as i32),
            None => return to_cents(principal / months_dec),
        };

        let factor = match Decimal::from_f64(factor_f64) {
            Some(f) if f > Decimal::ONE => f,
            _ => return to_cents(principal / months_dec),
        };

        to_cents(principal * monthly_rate * factor / (factor - Decimal::ONE))
    }

    /// Build a financing plan for one term
    ///
    /// The total and interest are derived from the rounded monthly payment
    /// so every number in the quote agrees with what the customer would
    /// actually pay each month.
    pub fn calculate_financing_plan(
        &self,
        car_price: Decimal,
        down_payment: Decimal,
        term_years: i64,
        annual_rate: Option<Decimal>,
    ) -> Result<FinancingPlan, FinancingError> {
        if !SUPPORTED_TERM_YEARS.contains(&term_years) {
            return Err(FinancingError::InvalidTerm { term_years });
        }

        // Zero and negative down payments are fine; financing more than
        // the sticker price is a dealer decision, not ours.
        if down_payment >= car_price {
            return Err(FinancingError::DownPaymentTooHigh);
        }

        let rate = annual_rate.unwrap_or(self.config.annual_interest_rate);
        let financed = car_price - down_payment;
        let term_months = term_years * MONTHS_PER_YEAR;

        let monthly_payment = self.calculate_monthly_payment(financed, rate, term_months);
        let total_amount = monthly_payment * Decimal::from(term_months);
        let interest_amount = total_amount - financed;

        Ok(FinancingPlan {
            term_years,
            term_months,
            monthly_payment,
            total_amount,
            interest_amount,
        })
    }

    /// Build plans for every supported term
    ///
    /// `down_payment` defaults to the configured fraction of the price,
    /// `annual_rate` to the configured rate. Terms that fail validation
    /// are skipped rather than failing the whole quote; a down payment at
    /// or above the price fails every term, so that one is rejected up
    /// front.
    pub fn calculate_all_plans(
        &self,
        car_price: Decimal,
        down_payment: Option<Decimal>,
        annual_rate: Option<Decimal>,
    ) -> Result<FinancingSummary, FinancingError> {
        let down_payment =
            down_payment.unwrap_or_else(|| self.config.default_down_payment(car_price));

        if down_payment >= car_price {
            return Err(FinancingError::DownPaymentTooHigh);
        }

        let rate = annual_rate.unwrap_or(self.config.annual_interest_rate);
        let financed = car_price - down_payment;

        let mut plans = Vec::with_capacity(SUPPORTED_TERM_YEARS.len());
        for term_years in SUPPORTED_TERM_YEARS {
            match self.calculate_financing_plan(car_price, down_payment, term_years, Some(rate)) {
                Ok(plan) => plans.push(plan),
                Err(err) => {
                    debug!(term_years, %err, "skipping financing term");
                }
            }
        }

        Ok(FinancingSummary {
            car_price,
            down_payment,
            financed_amount: financed,
            annual_interest_rate: rate,
            plans,
        })
    }
}
