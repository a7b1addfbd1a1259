use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::recommendation::cache::RecommendationCache;
use crate::domain::restaurant::catalog::RestaurantCatalog;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::repository::RestaurantRepository;
use crate::domain::restaurant::store::RestaurantStore;
use crate::domain::restaurant::use_cases::reload::{ReloadRestaurantsUseCase, ReloadSummary};

/// Loads the dataset from the repository and publishes it as a new store.
///
/// A failed load leaves the previously published store in place.
pub struct ReloadRestaurantsUseCaseImpl {
    pub repository: Arc<dyn RestaurantRepository>,
    pub catalog: Arc<RestaurantCatalog>,
    pub cache: Arc<RecommendationCache>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ReloadRestaurantsUseCase for ReloadRestaurantsUseCaseImpl {
    async fn execute(&self) -> Result<ReloadSummary, RestaurantError> {
        self.logger.info("Loading restaurant dataset");

        let restaurants = self.repository.all_restaurants().await.map_err(|e| {
            self.logger.error(&format!("Failed to load restaurants: {}", e));
            RestaurantError::from(e)
        })?;

        let store = RestaurantStore::new(restaurants)?;
        let restaurants = store.len();
        let generation = self.catalog.publish(store);
        self.cache.clear();

        let summary = ReloadSummary {
            restaurants,
            generation,
        };

        self.logger.info(&format!(
            "Published {} restaurants (generation {})",
            summary.restaurants, summary.generation
        ));

        Ok(summary)
    }
}
