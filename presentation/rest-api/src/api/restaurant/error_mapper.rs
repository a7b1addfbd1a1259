use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::restaurant::errors::RestaurantError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for RestaurantError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            RestaurantError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceUnavailable",
                "restaurant.store_unavailable",
            ),
            RestaurantError::NameEmpty => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "InvalidDataset",
                "restaurant.name_empty",
            ),
            RestaurantError::InvalidRating => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "InvalidDataset",
                "restaurant.invalid_rating",
            ),
            RestaurantError::DuplicateId(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "InvalidDataset",
                "restaurant.duplicate_id",
            ),
            RestaurantError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        };

        (status, ErrorResponse::json(name, message))
    }
}
