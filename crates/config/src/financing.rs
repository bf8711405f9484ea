//! Financing business configuration
//!
//! Contains configurable business parameters for vehicle financing
//! calculations. Rates are fractions, not percentages: 0.10 means 10%.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Financing business configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingConfig {
    /// Annual interest rate as a fraction (0.10 = 10%)
    #[serde(default = "default_annual_interest_rate")]
    pub annual_interest_rate: Decimal,

    /// Down payment assumed when the customer does not name one,
    /// as a fraction of the vehicle price
    #[serde(default = "default_down_payment_percent")]
    pub default_down_payment_percent: Decimal,
}

// Default values
fn default_annual_interest_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

fn default_down_payment_percent() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

impl Default for FinancingConfig {
    fn default() -> Self {
        Self {
            annual_interest_rate: default_annual_interest_rate(),
            default_down_payment_percent: default_down_payment_percent(),
        }
    }
}

impl FinancingConfig {
    /// Default down payment for a vehicle price, rounded to cents
    pub fn default_down_payment(&self, car_price: Decimal) -> Decimal {
        (car_price * self.default_down_payment_percent)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
