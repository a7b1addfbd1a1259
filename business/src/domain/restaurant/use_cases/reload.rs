use async_trait::async_trait;

use crate::domain::restaurant::errors::RestaurantError;

/// Outcome of publishing a freshly loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadSummary {
    pub restaurants: usize,
    pub generation: u64,
}

#[async_trait]
pub trait ReloadRestaurantsUseCase: Send + Sync {
    async fn execute(&self) -> Result<ReloadSummary, RestaurantError>;
}
