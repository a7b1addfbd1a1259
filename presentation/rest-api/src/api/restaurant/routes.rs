use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{OpenApi, payload::Json};

use business::domain::restaurant::use_cases::list_cities::ListCitiesUseCase;
use business::domain::restaurant::use_cases::reload::ReloadRestaurantsUseCase;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::restaurant::dto::{CitiesResponse, ReloadResponse};
use crate::api::tags::ApiTags;

pub struct RestaurantApi {
    list_cities_use_case: Arc<dyn ListCitiesUseCase>,
    reload_use_case: Arc<dyn ReloadRestaurantsUseCase>,
}

impl RestaurantApi {
    pub fn new(
        list_cities_use_case: Arc<dyn ListCitiesUseCase>,
        reload_use_case: Arc<dyn ReloadRestaurantsUseCase>,
    ) -> Self {
        Self {
            list_cities_use_case,
            reload_use_case,
        }
    }
}

/// Restaurant dataset API
#[OpenApi]
impl RestaurantApi {
    /// List cities
    ///
    /// Returns every city present in the loaded dataset.
    #[oai(path = "/cities", method = "get", tag = "ApiTags::Restaurants")]
    async fn list_cities(&self) -> ListCitiesResponse {
        match self.list_cities_use_case.execute().await {
            Ok(cities) => ListCitiesResponse::Ok(Json(cities.into())),
            Err(err) => {
                let (_, json) = err.into_error_response();
                ListCitiesResponse::ServiceUnavailable(json)
            }
        }
    }

    /// Reload dataset
    ///
    /// Reads the dataset again and publishes it. Requests already running keep
    /// the previous data; cached recommendations are discarded.
    #[oai(path = "/restaurants/reload", method = "post", tag = "ApiTags::Restaurants")]
    async fn reload(&self) -> ReloadDatasetResponse {
        match self.reload_use_case.execute().await {
            Ok(summary) => ReloadDatasetResponse::Ok(Json(summary.into())),
            Err(err) => match err.into_error_response() {
                (StatusCode::UNPROCESSABLE_ENTITY, json) => {
                    ReloadDatasetResponse::UnprocessableEntity(json)
                }
                (_, json) => ReloadDatasetResponse::InternalError(json),
            },
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListCitiesResponse {
    #[oai(status = 200)]
    Ok(Json<CitiesResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ReloadDatasetResponse {
    #[oai(status = 200)]
    Ok(Json<ReloadResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
