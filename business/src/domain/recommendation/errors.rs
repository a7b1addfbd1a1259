use std::time::Duration;

/// Errors surfaced to callers of the recommendation use case.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("recommendation.invalid_price")]
    InvalidPrice,
    #[error("recommendation.invalid_city")]
    InvalidCity,
    #[error("recommendation.invalid_top_k")]
    InvalidTopK,
    #[error("recommendation.store_unavailable")]
    StoreUnavailable,
}

impl RecommendationError {
    /// True for the errors caused by the caller's input.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            RecommendationError::InvalidPrice
                | RecommendationError::InvalidCity
                | RecommendationError::InvalidTopK
        )
    }
}

/// Failures at the language model boundary.
///
/// None of these reach the caller; every one of them ends in the fallback
/// ranking. Only `RateLimited` and `Transient` are worth another attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("llm.unavailable")]
    Unavailable,
    #[error("llm.transient")]
    Transient,
    #[error("llm.rate_limited")]
    RateLimited { retry_after: Option<Duration> },
    #[error("llm.timeout")]
    Timeout,
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. } | LlmError::Transient)
    }
}

/// The model answered, but nothing usable could be read from it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("llm.response_malformed")]
    Malformed,
    #[error("llm.response_no_known_restaurants")]
    NoKnownRestaurants,
}
