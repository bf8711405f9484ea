//! Catalog Search Service
//!
//! Resolves fuzzy user terms against the live catalog before filtering. The
//! matcher runs over the real makes and models first; the static alias table
//! only speaks when the catalog is silent.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use car_agent_config::{MatchingConfig, SearchConfig};
use car_agent_core::{Car, CarFilter, CatalogRepository, Result};

use crate::aliases::normalize_brand;
use crate::matcher::{find_similar_brand_with_threshold, find_similar_model_with_threshold};
use crate::text::{extract_car_references, normalize_model};

/// A search request as the user phrased it: raw make/model text plus
/// numeric bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    /// Exact model year; combined with the bounds when both are given
    pub year: Option<i32>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub km_max: Option<i32>,
    pub limit: Option<usize>,
}

/// Catalog search with fuzzy make/model resolution.
pub struct CarSearchService {
    repo: Arc<dyn CatalogRepository>,
    matching: MatchingConfig,
    search: SearchConfig,
}

impl CarSearchService {
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        matching: MatchingConfig,
        search: SearchConfig,
    ) -> Self {
        Self {
            repo,
            matching,
            search,
        }
    }

    /// Resolve raw make text to a catalog make.
    ///
    /// Matches against the live makes first; when none is close enough the
    /// alias table's normalization passes through as a plain filter term.
    pub async fn resolve_make(&self, raw: &str) -> Result<Option<String>> {
        let makes = self.repo.get_all_makes().await?;
        let resolved =
            find_similar_brand_with_threshold(raw, &makes, self.matching.similarity_threshold)
                .or_else(|| normalize_brand(raw));
        debug!(raw, ?resolved, "resolved make");
        Ok(resolved)
    }

    /// Resolve raw model text to a catalog model.
    ///
    /// Candidates are the models of `make` when one is known, otherwise the
    /// whole catalog's models.
    pub async fn resolve_model(&self, make: Option<&str>, raw: &str) -> Result<Option<String>> {
        let models = self.repo.get_models_by_make(make.unwrap_or("")).await?;
        let resolved =
            find_similar_model_with_threshold(raw, &models, self.matching.similarity_threshold)
                .or_else(|| Some(normalize_model(raw)).filter(|m| !m.is_empty()));
        debug!(raw, ?make, ?resolved, "resolved model");
        Ok(resolved)
    }

    /// Search the catalog, resolving the query's make/model text first.
    pub async fn search(&self, query: &CarQuery) -> Result<Vec<Car>> {
        let make = match query.make.as_deref() {
            Some(raw) => self.resolve_make(raw).await?,
            None => None,
        };
        let model = match query.model.as_deref() {
            Some(raw) => self.resolve_model(make.as_deref(), raw).await?,
            None => None,
        };

        // An exact year tightens both bounds so all given conditions still hold
        let year_min = match (query.year, query.year_min) {
            (Some(year), Some(min)) => Some(year.max(min)),
            (year, min) => year.or(min),
        };
        let year_max = match (query.year, query.year_max) {
            (Some(year), Some(max)) => Some(year.min(max)),
            (year, max) => year.or(max),
        };

        let limit = query
            .limit
            .unwrap_or(self.search.default_limit)
            .clamp(1, self.search.max_limit);

        let filter = CarFilter {
            make,
            model,
            year_min,
            year_max,
            price_min: query.price_min,
            price_max: query.price_max,
            km_max: query.km_max,
            limit: Some(limit),
        };

        let cars = self.repo.search(&filter).await?;
        debug!(count = cars.len(), ?filter, "catalog search");
        Ok(cars)
    }

    /// Find one car from a free-text reference: a stock ID, or "brand model"
    /// text like "toyota corolla".
    pub async fn find_by_reference(&self, reference: &str) -> Result<Option<Car>> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if let Some(car) = self.repo.get_by_stock_id(trimmed).await? {
            return Ok(Some(car));
        }

        let (make, model) = extract_car_references(trimmed);
        if make.is_none() && model.is_none() {
            return Ok(None);
        }

        let query = CarQuery {
            make,
            model,
            limit: Some(1),
            ..CarQuery::default()
        };
        let cars = self.search(&query).await?;
        Ok(cars.into_iter().next())
    }
}
