use async_trait::async_trait;

use crate::domain::restaurant::errors::RestaurantError;

#[async_trait]
pub trait ListCitiesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<String>, RestaurantError>;
}
