use serde::{Deserialize, Serialize};

use crate::domain::restaurant::model::Restaurant;

use super::errors::RecommendationError;
use super::statistics::CandidateStatistics;

pub const DEFAULT_TOP_K: usize = 10;
pub const MAX_TOP_K: usize = 50;

/// A validated recommendation request. Lives for one call only.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRequest {
    city: String,
    max_price: u32,
    top_k: usize,
}

impl UserRequest {
    pub fn new(city: &str, max_price: u32, top_k: usize) -> Result<Self, RecommendationError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(RecommendationError::InvalidCity);
        }
        if max_price == 0 {
            return Err(RecommendationError::InvalidPrice);
        }
        if top_k == 0 || top_k > MAX_TOP_K {
            return Err(RecommendationError::InvalidTopK);
        }

        Ok(Self {
            city: city.to_string(),
            max_price,
            top_k,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn max_price(&self) -> u32 {
        self.max_price
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// Which path produced the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    Llm,
    Fallback,
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSource::Llm => write!(f, "llm"),
            RecommendationSource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendation {
    pub rank: usize,
    pub restaurant: Restaurant,
    /// Model explanation; empty on the fallback path.
    pub reason: String,
    /// Weighted fallback score; `None` when the model ranked the entry.
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<RankedRecommendation>,
    pub source: RecommendationSource,
    pub total_candidates: usize,
    pub statistics: CandidateStatistics,
    /// Places to try instead when nothing matched the requested city.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Ranks are exactly 1..=N in list order.
pub fn has_contiguous_ranks(recommendations: &[RankedRecommendation]) -> bool {
    recommendations
        .iter()
        .enumerate()
        .all(|(index, rec)| rec.rank == index + 1)
}

/// Drops everything past `top_k`; ranks stay contiguous because only the
/// tail is removed.
pub fn truncate_to_top_k(
    mut recommendations: Vec<RankedRecommendation>,
    top_k: usize,
) -> Vec<RankedRecommendation> {
    recommendations.truncate(top_k);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::model::fixtures::restaurant;

    #[test]
    fn should_trim_city_when_creating_request() {
        let request = UserRequest::new("  Banashankari ", 800, 5).unwrap();

        assert_eq!(request.city(), "Banashankari");
        assert_eq!(request.max_price(), 800);
        assert_eq!(request.top_k(), 5);
    }

    #[test]
    fn should_reject_non_positive_price() {
        let result = UserRequest::new("Banashankari", 0, 5);

        assert!(matches!(result.unwrap_err(), RecommendationError::InvalidPrice));
    }

    #[test]
    fn should_reject_blank_city() {
        let result = UserRequest::new("   ", 500, 5);

        assert!(matches!(result.unwrap_err(), RecommendationError::InvalidCity));
    }

    #[test]
    fn should_reject_top_k_out_of_range() {
        assert!(matches!(
            UserRequest::new("BTM", 500, 0).unwrap_err(),
            RecommendationError::InvalidTopK
        ));
        assert!(matches!(
            UserRequest::new("BTM", 500, MAX_TOP_K + 1).unwrap_err(),
            RecommendationError::InvalidTopK
        ));
        assert!(UserRequest::new("BTM", 500, MAX_TOP_K).is_ok());
    }

    #[test]
    fn should_detect_rank_gaps() {
        let ranked = |rank| RankedRecommendation {
            rank,
            restaurant: restaurant(rank as u64, "R", 4.0, 1, 100),
            reason: String::new(),
            score: None,
        };

        assert!(has_contiguous_ranks(&[ranked(1), ranked(2), ranked(3)]));
        assert!(!has_contiguous_ranks(&[ranked(1), ranked(3)]));
        assert!(!has_contiguous_ranks(&[ranked(2)]));
        assert!(has_contiguous_ranks(&[]));
    }

    #[test]
    fn should_keep_ranks_contiguous_after_truncation() {
        let list: Vec<_> = (1..=5)
            .map(|rank| RankedRecommendation {
                rank,
                restaurant: restaurant(rank as u64, "R", 4.0, 1, 100),
                reason: String::new(),
                score: None,
            })
            .collect();

        let truncated = truncate_to_top_k(list, 3);

        assert_eq!(truncated.len(), 3);
        assert!(has_contiguous_ranks(&truncated));
    }
}
