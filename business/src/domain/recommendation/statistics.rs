use serde::{Deserialize, Serialize};

use crate::domain::restaurant::filter::CandidateSet;

/// Summary of the candidate set a result was drawn from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateStatistics {
    pub total_restaurants: usize,
    pub average_rating: f64,
    pub average_price: f64,
    pub min_price: u32,
    pub max_price: u32,
}

impl CandidateStatistics {
    /// All zeroes for an empty set.
    pub fn from_candidates(candidates: &CandidateSet<'_>) -> Self {
        if candidates.is_empty() {
            return Self::default();
        }

        let count = candidates.len() as f64;
        let rating_sum: f64 = candidates.iter().map(|r| f64::from(r.rating)).sum();
        let price_sum: f64 = candidates.iter().map(|r| f64::from(r.price_for_two)).sum();
        let min_price = candidates.iter().map(|r| r.price_for_two).min().unwrap_or(0);
        let max_price = candidates.iter().map(|r| r.price_for_two).max().unwrap_or(0);

        Self {
            total_restaurants: candidates.len(),
            average_rating: rating_sum / count,
            average_price: price_sum / count,
            min_price,
            max_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::model::fixtures::restaurant;

    #[test]
    fn should_return_zeroes_for_empty_candidates() {
        let stats = CandidateStatistics::from_candidates(&CandidateSet::default());

        assert_eq!(stats, CandidateStatistics::default());
    }

    #[test]
    fn should_summarise_candidates() {
        let a = restaurant(1, "A", 4.0, 10, 300);
        let b = restaurant(2, "B", 3.0, 20, 700);
        let candidates = CandidateSet::new(vec![&a, &b]);

        let stats = CandidateStatistics::from_candidates(&candidates);

        assert_eq!(stats.total_restaurants, 2);
        assert!((stats.average_rating - 3.5).abs() < 1e-9);
        assert!((stats.average_price - 500.0).abs() < 1e-9);
        assert_eq!(stats.min_price, 300);
        assert_eq!(stats.max_price, 700);
    }
}
