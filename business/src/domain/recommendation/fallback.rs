use std::cmp::Ordering;

use crate::domain::restaurant::filter::CandidateSet;
use crate::domain::restaurant::model::Restaurant;

use super::context::by_rating_then_votes;
use super::model::RankedRecommendation;

const RATING_WEIGHT: f64 = 0.4;
const POPULARITY_WEIGHT: f64 = 0.3;
const PRICE_WEIGHT: f64 = 0.2;
const COMPLETENESS_WEIGHT: f64 = 0.1;

/// Fallback ordering: rating desc, votes desc, price asc.
pub fn fallback_order(a: &Restaurant, b: &Restaurant) -> Ordering {
    by_rating_then_votes(a, b).then_with(|| a.price_for_two.cmp(&b.price_for_two))
}

/// Deterministic ranking used whenever the model path fails.
///
/// Never fails: an empty candidate set gives an empty list. Reasons are left
/// empty and every entry carries the weighted score.
pub fn rank_fallback(candidates: &CandidateSet<'_>, top_k: usize) -> Vec<RankedRecommendation> {
    let scorer = Scorer::new(candidates);

    let mut ordered: Vec<&Restaurant> = candidates.iter().collect();
    ordered.sort_by(|a, b| fallback_order(a, b));

    ordered
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(index, restaurant)| RankedRecommendation {
            rank: index + 1,
            restaurant: restaurant.clone(),
            reason: String::new(),
            score: Some(scorer.score(restaurant)),
        })
        .collect()
}

/// Normalisation bounds taken from the whole candidate set.
struct Scorer {
    max_rating: f64,
    max_popularity: f64,
    max_price: f64,
}

impl Scorer {
    fn new(candidates: &CandidateSet<'_>) -> Self {
        let max_rating = candidates
            .iter()
            .map(|r| f64::from(r.rating))
            .fold(0.0, f64::max);
        let max_popularity = candidates
            .iter()
            .map(popularity)
            .fold(0.0, f64::max);
        let max_price = candidates
            .iter()
            .map(|r| f64::from(r.price_for_two))
            .fold(0.0, f64::max);

        Self {
            max_rating: if max_rating > 0.0 { max_rating } else { 5.0 },
            max_popularity,
            max_price,
        }
    }

    /// Weighted score in [0, 1]. Informational only; ordering comes from
    /// `fallback_order`.
    fn score(&self, restaurant: &Restaurant) -> f64 {
        let rating = f64::from(restaurant.rating) / self.max_rating;
        let popularity = if self.max_popularity > 0.0 {
            popularity(restaurant) / self.max_popularity
        } else {
            0.0
        };
        let price = if self.max_price > 0.0 {
            1.0 - f64::from(restaurant.price_for_two) / self.max_price
        } else {
            0.5
        };

        RATING_WEIGHT * rating
            + POPULARITY_WEIGHT * popularity
            + PRICE_WEIGHT * price
            + COMPLETENESS_WEIGHT * completeness(restaurant)
    }
}

fn popularity(restaurant: &Restaurant) -> f64 {
    f64::from(restaurant.vote_count).ln_1p()
}

fn completeness(restaurant: &Restaurant) -> f64 {
    let filled = [
        !restaurant.cuisines.is_empty(),
        !restaurant.restaurant_type.is_empty(),
        !restaurant.popular_dishes.is_empty(),
    ]
    .iter()
    .filter(|present| **present)
    .count();
    filled as f64 / 3.0
}
