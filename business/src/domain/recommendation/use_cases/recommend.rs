use async_trait::async_trait;

use crate::domain::recommendation::errors::RecommendationError;
use crate::domain::recommendation::model::RecommendationResult;

pub struct RecommendRestaurantsParams {
    pub city: String,
    pub max_price: u32,
    pub top_k: usize,
}

#[async_trait]
pub trait RecommendRestaurantsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: RecommendRestaurantsParams,
    ) -> Result<RecommendationResult, RecommendationError>;
}
