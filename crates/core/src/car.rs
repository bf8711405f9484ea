//! Catalog entity types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vehicle in the sales catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Internal record ID
    pub id: Uuid,

    /// Stock ID shown to customers (unique business key)
    pub stock_id: String,

    /// Manufacturer (e.g., "Toyota")
    pub make: String,

    /// Model name (e.g., "Corolla")
    pub model: String,

    /// Model year
    pub year: i32,

    /// Odometer reading in kilometers
    pub km: i32,

    /// Listed price
    pub price: Decimal,

    /// Trim / version (e.g., "LE", "Limited")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Bluetooth support
    #[serde(default)]
    pub bluetooth: bool,

    /// Apple CarPlay support
    #[serde(default)]
    pub car_play: bool,

    /// Exterior length in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<i32>,

    /// Exterior width in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<i32>,

    /// Exterior height in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<i32>,
}

impl Car {
    /// Short display name, e.g. "2020 Toyota Corolla"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.stock_id)
    }
}

/// Search filter for the catalog
///
/// All fields are optional; an empty filter matches the whole catalog.
/// Make and model are matched as case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub km_max: Option<i32>,

    /// Maximum number of results to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl CarFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by make (substring, case-insensitive)
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Filter by model (substring, case-insensitive)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Filter by minimum model year (inclusive)
    pub fn with_year_min(mut self, year: i32) -> Self {
        self.year_min = Some(year);
        self
    }

    /// Filter by maximum model year (inclusive)
    pub fn with_year_max(mut self, year: i32) -> Self {
        self.year_max = Some(year);
        self
    }

    /// Filter by minimum price (inclusive)
    pub fn with_price_min(mut self, price: Decimal) -> Self {
        self.price_min = Some(price);
        self
    }

    /// Filter by maximum price (inclusive)
    pub fn with_price_max(mut self, price: Decimal) -> Self {
        self.price_max = Some(price);
        self
    }

    /// Filter by maximum mileage (inclusive)
    pub fn with_km_max(mut self, km: i32) -> Self {
        self.km_max = Some(km);
        self
    }

    /// Cap the number of results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True if no criteria are set (limit alone does not count)
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year_min.is_none()
            && self.year_max.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.km_max.is_none()
    }
}
