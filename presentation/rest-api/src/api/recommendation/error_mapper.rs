use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::recommendation::errors::RecommendationError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for RecommendationError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            RecommendationError::InvalidPrice => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "recommendation.invalid_price",
            ),
            RecommendationError::InvalidCity => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "recommendation.invalid_city",
            ),
            RecommendationError::InvalidTopK => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "recommendation.invalid_top_k",
            ),
            RecommendationError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceUnavailable",
                "recommendation.store_unavailable",
            ),
        };

        (status, ErrorResponse::json(name, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_invalid_requests_to_bad_request() {
        for err in [
            RecommendationError::InvalidPrice,
            RecommendationError::InvalidCity,
            RecommendationError::InvalidTopK,
        ] {
            let expected = err.to_string();
            let (status, json) = err.into_error_response();

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json.0.message, expected);
        }
    }

    #[test]
    fn should_map_missing_store_to_service_unavailable() {
        let (status, json) = RecommendationError::StoreUnavailable.into_error_response();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json.0.name, "ServiceUnavailable");
    }
}
