use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::Restaurant;

/// Read-only source of the preprocessed restaurant dataset.
///
/// Cleaning and normalisation happen upstream; implementations only map
/// stored rows into domain records.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn all_restaurants(&self) -> Result<Vec<Restaurant>, RepositoryError>;
}
