use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recommendation::llm_call::call_with_retry;
use crate::domain::logger::Logger;
use crate::domain::recommendation::cache::{CacheKey, RecommendationCache};
use crate::domain::recommendation::context::{ContextBudget, build_context};
use crate::domain::recommendation::errors::{LlmError, ParseError, RecommendationError};
use crate::domain::recommendation::fallback::rank_fallback;
use crate::domain::recommendation::model::{
    RankedRecommendation, RecommendationResult, RecommendationSource, UserRequest,
    truncate_to_top_k,
};
use crate::domain::recommendation::parser::parse_response;
use crate::domain::recommendation::prompt::build_prompt;
use crate::domain::recommendation::services::{LanguageModel, RetryPolicy};
use crate::domain::recommendation::statistics::CandidateStatistics;
use crate::domain::recommendation::use_cases::recommend::{
    RecommendRestaurantsParams, RecommendRestaurantsUseCase,
};
use crate::domain::restaurant::catalog::RestaurantCatalog;
use crate::domain::restaurant::filter::{CandidateSet, filter};

pub struct RecommendRestaurantsUseCaseImpl {
    pub catalog: Arc<RestaurantCatalog>,
    pub model: Arc<dyn LanguageModel>,
    pub cache: Arc<RecommendationCache>,
    pub context_budget: ContextBudget,
    pub retry_policy: RetryPolicy,
    pub logger: Arc<dyn Logger>,
}

/// Why the model ranking was abandoned for a request.
#[derive(Debug, thiserror::Error)]
enum ModelRankingError {
    #[error(transparent)]
    Model(#[from] LlmError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("context.empty")]
    EmptyContext,
}

impl ModelRankingError {
    /// Whether the same candidates would fail the same way again. A failed
    /// model call may succeed on the next request.
    fn is_deterministic(&self) -> bool {
        !matches!(self, ModelRankingError::Model(_))
    }
}

impl RecommendRestaurantsUseCaseImpl {
    async fn rank_with_model(
        &self,
        candidates: &CandidateSet<'_>,
        request: &UserRequest,
    ) -> Result<Vec<RankedRecommendation>, ModelRankingError> {
        let context = build_context(candidates, &self.context_budget);
        if context.included() == 0 {
            return Err(ModelRankingError::EmptyContext);
        }
        self.logger.debug(&format!(
            "Sending {} of {} candidates to the model",
            context.included(),
            candidates.len()
        ));

        let prompt = build_prompt(&context, request, request.top_k());
        let raw = call_with_retry(
            self.model.as_ref(),
            &prompt,
            &self.retry_policy,
            self.logger.as_ref(),
        )
        .await?;

        let parsed = parse_response(&raw, candidates)?;
        if !parsed.dropped.is_empty() {
            self.logger.warn(&format!(
                "Dropped {} model entries not in the candidate set: {:?}",
                parsed.dropped.len(),
                parsed.dropped
            ));
        }

        Ok(truncate_to_top_k(parsed.recommendations, request.top_k()))
    }
}

#[async_trait]
impl RecommendRestaurantsUseCase for RecommendRestaurantsUseCaseImpl {
    async fn execute(
        &self,
        params: RecommendRestaurantsParams,
    ) -> Result<RecommendationResult, RecommendationError> {
        let request = UserRequest::new(&params.city, params.max_price, params.top_k)?;

        self.logger.info(&format!(
            "Recommending for city: {}, max price: {}, top {}",
            request.city(),
            request.max_price(),
            request.top_k()
        ));

        let store = self
            .catalog
            .snapshot()
            .ok_or(RecommendationError::StoreUnavailable)?;

        let key = CacheKey::for_request(&request);
        if let Some(cached) = self.cache.get(&key, store.generation()) {
            self.logger.debug("Serving recommendation from cache");
            return Ok(cached);
        }

        let candidates = filter(store.all_restaurants(), &request);
        let statistics = CandidateStatistics::from_candidates(&candidates);

        let mut suggestions = vec![];
        let (recommendations, source, cacheable) = if candidates.is_empty() {
            self.logger.info("No restaurants found matching criteria");
            suggestions = store.suggest_places(request.city());
            (vec![], RecommendationSource::Fallback, true)
        } else {
            match self.rank_with_model(&candidates, &request).await {
                Ok(recommendations) => (recommendations, RecommendationSource::Llm, true),
                Err(err) => {
                    self.logger
                        .warn(&format!("Model ranking failed ({}), using fallback", err));
                    (
                        rank_fallback(&candidates, request.top_k()),
                        RecommendationSource::Fallback,
                        err.is_deterministic(),
                    )
                }
            }
        };

        let result = RecommendationResult {
            recommendations,
            source,
            total_candidates: candidates.len(),
            statistics,
            suggestions,
        };

        self.logger.info(&format!(
            "Returning {} recommendations from {} ({} candidates)",
            result.recommendations.len(),
            result.source,
            result.total_candidates
        ));

        if cacheable {
            self.cache.insert(key, store.generation(), result.clone());
        }
        Ok(result)
    }
}
