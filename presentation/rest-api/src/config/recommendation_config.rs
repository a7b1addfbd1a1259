use chrono::Duration;

use business::domain::recommendation::cache::DEFAULT_TTL_SECS;
use business::domain::recommendation::context::{
    ContextBudget, DEFAULT_MAX_CHARS, DEFAULT_MAX_RESTAURANTS,
};
use business::domain::recommendation::model::{DEFAULT_TOP_K, MAX_TOP_K};

use super::{env_lookup, parse_or};

/// Tuning for the recommendation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationConfig {
    pub context_budget: ContextBudget,
    pub cache_ttl: Duration,
    /// Used when a request does not say how many results it wants.
    pub default_top_k: usize,
}

impl RecommendationConfig {
    /// Environment variables:
    /// - CONTEXT_MAX_RESTAURANTS (default: 50)
    /// - CONTEXT_MAX_CHARS (default: 12000)
    /// - RECOMMENDATION_CACHE_TTL_SECS (default: 600)
    /// - DEFAULT_TOP_K (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let default_top_k = parse_or(lookup, "DEFAULT_TOP_K", DEFAULT_TOP_K);
        let ttl_secs = parse_or(lookup, "RECOMMENDATION_CACHE_TTL_SECS", DEFAULT_TTL_SECS);

        Self {
            context_budget: ContextBudget {
                max_restaurants: parse_or(
                    lookup,
                    "CONTEXT_MAX_RESTAURANTS",
                    DEFAULT_MAX_RESTAURANTS,
                ),
                max_chars: parse_or(lookup, "CONTEXT_MAX_CHARS", DEFAULT_MAX_CHARS),
            },
            cache_ttl: cache_ttl(ttl_secs),
            default_top_k: if (1..=MAX_TOP_K).contains(&default_top_k) {
                default_top_k
            } else {
                DEFAULT_TOP_K
            },
        }
    }
}

/// Negative or out-of-range values keep the default TTL.
fn cache_ttl(secs: i64) -> Duration {
    Duration::try_seconds(secs)
        .filter(|ttl| *ttl >= Duration::zero())
        .unwrap_or_else(|| Duration::seconds(DEFAULT_TTL_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;

    #[test]
    fn should_use_defaults_without_variables() {
        let config = RecommendationConfig::from_lookup(&map_lookup(&[]));

        assert_eq!(config.context_budget, ContextBudget::default());
        assert_eq!(config.cache_ttl, Duration::seconds(600));
        assert_eq!(config.default_top_k, 10);
    }

    #[test]
    fn should_read_overrides() {
        let config = RecommendationConfig::from_lookup(&map_lookup(&[
            ("CONTEXT_MAX_RESTAURANTS", "20"),
            ("CONTEXT_MAX_CHARS", "4000"),
            ("RECOMMENDATION_CACHE_TTL_SECS", "0"),
            ("DEFAULT_TOP_K", "5"),
        ]));

        assert_eq!(config.context_budget.max_restaurants, 20);
        assert_eq!(config.context_budget.max_chars, 4000);
        assert_eq!(config.cache_ttl, Duration::zero());
        assert_eq!(config.default_top_k, 5);
    }

    #[test]
    fn should_ignore_out_of_range_default_top_k() {
        let config = RecommendationConfig::from_lookup(&map_lookup(&[("DEFAULT_TOP_K", "500")]));

        assert_eq!(config.default_top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn should_keep_default_ttl_for_unrepresentable_values() {
        for value in ["9223372036854775807", "-5", "forever"] {
            let config = RecommendationConfig::from_lookup(&map_lookup(&[(
                "RECOMMENDATION_CACHE_TTL_SECS",
                value,
            )]));

            assert_eq!(config.cache_ttl, Duration::seconds(DEFAULT_TTL_SECS));
        }
    }
}
