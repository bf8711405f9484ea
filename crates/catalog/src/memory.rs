//! In-Memory Catalog
//!
//! A `Vec<Car>` behind the repository trait, for demos and integration tests.
//! Matching and ordering follow the same contract a SQL backend would honor.

use async_trait::async_trait;

use car_agent_core::{Car, CarFilter, CatalogRepository, Result};

/// In-memory implementation of [`CatalogRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    cars: Vec<Car>,
}

impl InMemoryCatalog {
    pub fn new(cars: Vec<Car>) -> Self {
        Self { cars }
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    fn matches(car: &Car, filter: &CarFilter) -> bool {
        if let Some(make) = &filter.make {
            if !car.make.to_lowercase().contains(&make.to_lowercase()) {
                return false;
            }
        }
        if let Some(model) = &filter.model {
            if !car.model.to_lowercase().contains(&model.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = filter.year_min {
            if car.year < min {
                return false;
            }
        }
        if let Some(max) = filter.year_max {
            if car.year > max {
                return false;
            }
        }
        if let Some(min) = filter.price_min {
            if car.price < min {
                return false;
            }
        }
        if let Some(max) = filter.price_max {
            if car.price > max {
                return false;
            }
        }
        if let Some(max) = filter.km_max {
            if car.km > max {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn get_by_stock_id(&self, stock_id: &str) -> Result<Option<Car>> {
        Ok(self.cars.iter().find(|c| c.stock_id == stock_id).cloned())
    }

    async fn get_all_makes(&self) -> Result<Vec<String>> {
        let mut makes: Vec<String> = self.cars.iter().map(|c| c.make.clone()).collect();
        makes.sort();
        makes.dedup();
        Ok(makes)
    }

    async fn get_models_by_make(&self, make: &str) -> Result<Vec<String>> {
        let needle = make.to_lowercase();
        let mut models: Vec<String> = self
            .cars
            .iter()
            .filter(|c| c.make.to_lowercase().contains(&needle))
            .map(|c| c.model.clone())
            .collect();
        models.sort();
        models.dedup();
        Ok(models)
    }

    async fn search(&self, filter: &CarFilter) -> Result<Vec<Car>> {
        let mut cars: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| Self::matches(c, filter))
            .cloned()
            .collect();

        // Stable sort keeps insertion order for full ties
        cars.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then_with(|| a.price.cmp(&b.price))
                .then_with(|| a.km.cmp(&b.km))
        });

        if let Some(limit) = filter.limit {
            cars.truncate(limit);
        }

        Ok(cars)
    }
}
