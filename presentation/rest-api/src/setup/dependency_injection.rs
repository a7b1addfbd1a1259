use std::sync::Arc;

use business::domain::logger::Logger;
use logger::TracingLogger;

use business::application::recommendation::recommend::RecommendRestaurantsUseCaseImpl;
use business::application::restaurant::list_cities::ListCitiesUseCaseImpl;
use business::application::restaurant::reload::ReloadRestaurantsUseCaseImpl;
use business::domain::recommendation::cache::RecommendationCache;
use business::domain::restaurant::catalog::RestaurantCatalog;
use business::domain::restaurant::use_cases::reload::ReloadRestaurantsUseCase;

use crate::api::health::routes::Api as HealthApi;
use crate::api::recommendation::routes::RecommendationApi;
use crate::api::restaurant::routes::RestaurantApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub recommendation_api: RecommendationApi,
    pub restaurant_api: RestaurantApi,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        // Shared state
        let catalog = Arc::new(RestaurantCatalog::new());
        let cache = Arc::new(RecommendationCache::new(config.recommendation.cache_ttl));

        // Infrastructure adapters
        let repository = config.dataset.init_repository(logger.clone()).await?;
        let model = config.llm.build_model();
        if !config.llm.is_enabled() {
            logger.warn("No LLM API key configured; serving fallback rankings only");
        }

        // Restaurant use cases
        let reload_use_case = Arc::new(ReloadRestaurantsUseCaseImpl {
            repository,
            catalog: catalog.clone(),
            cache: cache.clone(),
            logger: logger.clone(),
        });
        let list_cities_use_case = Arc::new(ListCitiesUseCaseImpl {
            catalog: catalog.clone(),
            logger: logger.clone(),
        });

        // Requests answer 503 until a dataset is published, so a failed first
        // load does not stop the server.
        if let Err(err) = reload_use_case.execute().await {
            logger.error(&format!("Initial dataset load failed: {}", err));
        }

        // Recommendation use cases
        let recommend_use_case = Arc::new(RecommendRestaurantsUseCaseImpl {
            catalog: catalog.clone(),
            model,
            cache,
            context_budget: config.recommendation.context_budget,
            retry_policy: config.llm.retry_policy,
            logger,
        });

        let health_api = HealthApi::new(catalog, config.llm.is_enabled());
        let recommendation_api =
            RecommendationApi::new(recommend_use_case, config.recommendation.default_top_k);
        let restaurant_api = RestaurantApi::new(list_cities_use_case, reload_use_case);

        Ok(Self {
            health_api,
            recommendation_api,
            restaurant_api,
        })
    }
}
