use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::restaurant::catalog::RestaurantCatalog;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "snake_case")]
pub struct HealthCheckResponse {
    /// "healthy" once a dataset is loaded, "degraded" before that
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Generation of the published dataset (0 when none is loaded)
    pub dataset_generation: u64,
    /// Whether the language model is configured
    pub llm_enabled: bool,
}

/// Health API for monitoring and infrastructure checks
pub struct Api {
    catalog: Arc<RestaurantCatalog>,
    llm_enabled: bool,
}

impl Api {
    pub fn new(catalog: Arc<RestaurantCatalog>, llm_enabled: bool) -> Self {
        Self {
            catalog,
            llm_enabled,
        }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Always answers 200 while the process is up. `status` reports whether
    /// recommendations can be served.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let generation = self.catalog.generation();
        Json(HealthCheckResponse {
            status: if generation > 0 { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_generation: generation,
            llm_enabled: self.llm_enabled,
        })
    }
}
