use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::recommendation::use_cases::recommend::{
    RecommendRestaurantsParams, RecommendRestaurantsUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::recommendation::dto::{RecommendRequest, RecommendationsResponse};
use crate::api::tags::ApiTags;

pub struct RecommendationApi {
    recommend_use_case: Arc<dyn RecommendRestaurantsUseCase>,
    default_top_k: usize,
}

impl RecommendationApi {
    pub fn new(
        recommend_use_case: Arc<dyn RecommendRestaurantsUseCase>,
        default_top_k: usize,
    ) -> Self {
        Self {
            recommend_use_case,
            default_top_k,
        }
    }
}

/// Recommendation API
#[OpenApi]
impl RecommendationApi {
    /// Recommend restaurants
    ///
    /// Filters the dataset by city and budget, asks the language model to rank
    /// the candidates and explain each pick, and falls back to a rating-based
    /// ranking when the model is unavailable or its answer cannot be used.
    #[oai(path = "/recommendations", method = "post", tag = "ApiTags::Recommendations")]
    async fn recommend(&self, body: Json<RecommendRequest>) -> RecommendResponse {
        let request = body.0;
        let params = RecommendRestaurantsParams {
            city: request.city,
            max_price: request.max_price,
            top_k: request.top_k.unwrap_or(self.default_top_k),
        };

        match self.recommend_use_case.execute(params).await {
            Ok(result) => RecommendResponse::Ok(Json(result.into())),
            Err(err) if err.is_invalid_request() => {
                let (_, json) = err.into_error_response();
                RecommendResponse::BadRequest(json)
            }
            Err(err) => {
                let (_, json) = err.into_error_response();
                RecommendResponse::ServiceUnavailable(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RecommendResponse {
    #[oai(status = 200)]
    Ok(Json<RecommendationsResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
}
