//! Catalog repository trait
//!
//! Storage backends implement `CatalogRepository`. The agent layer only
//! speaks through this trait, so the catalog can live in SQL, an API, or
//! memory without the tools knowing.

use async_trait::async_trait;

use crate::car::{Car, CarFilter};
use crate::error::Result;

/// Read access to the vehicle catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Look up a single car by its stock ID
    async fn get_by_stock_id(&self, stock_id: &str) -> Result<Option<Car>>;

    /// All distinct makes in the catalog, sorted ascending
    async fn get_all_makes(&self) -> Result<Vec<String>>;

    /// Distinct models for a make (case-insensitive), sorted ascending
    async fn get_models_by_make(&self, make: &str) -> Result<Vec<String>>;

    /// Search the catalog
    ///
    /// Results are ordered newest year first, then cheapest first, then
    /// lowest mileage first. The filter's `limit` caps the result count.
    async fn search(&self, filter: &CarFilter) -> Result<Vec<Car>>;
}
