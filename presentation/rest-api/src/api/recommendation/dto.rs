use poem_openapi::{Enum, Object};

use business::domain::recommendation::model::{
    RankedRecommendation, RecommendationResult, RecommendationSource,
};
use business::domain::recommendation::statistics::CandidateStatistics;
use business::domain::restaurant::model::Restaurant;

pub const EMPTY_RESULT_MESSAGE: &str = "No restaurants found matching criteria";

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RecommendRequest {
    /// City or neighbourhood, matched case-insensitively as a substring
    pub city: String,
    /// Maximum price for two people
    pub max_price: u32,
    /// Number of recommendations to return (1-50, default from configuration)
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Enum)]
pub enum SourceDto {
    #[oai(rename = "llm")]
    Llm,
    #[oai(rename = "fallback")]
    Fallback,
}

impl From<RecommendationSource> for SourceDto {
    fn from(source: RecommendationSource) -> Self {
        match source {
            RecommendationSource::Llm => SourceDto::Llm,
            RecommendationSource::Fallback => SourceDto::Fallback,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RestaurantDetailsResponse {
    pub id: u64,
    pub city: String,
    pub location: String,
    pub rating: f32,
    pub votes: u32,
    pub price_for_two: u32,
    pub cuisines: Vec<String>,
    pub restaurant_type: String,
    pub popular_dishes: Vec<String>,
    pub address: String,
    pub phone: String,
    pub online_order: bool,
    pub table_booking: bool,
}

impl From<Restaurant> for RestaurantDetailsResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id.value(),
            city: r.city,
            location: r.location,
            rating: r.rating,
            votes: r.vote_count,
            price_for_two: r.price_for_two,
            cuisines: r.cuisines,
            restaurant_type: r.restaurant_type,
            popular_dishes: r.popular_dishes,
            address: r.address,
            phone: r.phone,
            online_order: r.online_order,
            table_booking: r.table_booking,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RecommendationResponse {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    /// Model explanation; empty when the fallback ranking was used
    pub reason: String,
    /// Weighted fallback score in [0, 1]
    #[oai(skip_serializing_if_is_none)]
    pub score: Option<f64>,
    pub details: RestaurantDetailsResponse,
}

impl From<RankedRecommendation> for RecommendationResponse {
    fn from(r: RankedRecommendation) -> Self {
        Self {
            rank: r.rank,
            name: r.restaurant.name.clone(),
            reason: r.reason,
            score: r.score,
            details: r.restaurant.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct StatisticsResponse {
    pub total_restaurants: usize,
    pub average_rating: f64,
    pub average_price: f64,
    pub min_price: u32,
    pub max_price: u32,
}

impl From<CandidateStatistics> for StatisticsResponse {
    fn from(s: CandidateStatistics) -> Self {
        Self {
            total_restaurants: s.total_restaurants,
            average_rating: s.average_rating,
            average_price: s.average_price,
            min_price: s.min_price,
            max_price: s.max_price,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RecommendationsData {
    pub count: usize,
    /// Which path produced the ranking
    pub source: SourceDto,
    /// Restaurants that passed the city and price filters
    pub total_candidates: usize,
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct MetaResponse {
    pub message: String,
    /// Known cities or areas close to the requested one
    #[oai(skip_serializing_if_is_empty)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RecommendationsResponse {
    pub status: String,
    pub data: RecommendationsData,
    pub statistics: StatisticsResponse,
    #[oai(skip_serializing_if_is_none)]
    pub meta: Option<MetaResponse>,
}

impl From<RecommendationResult> for RecommendationsResponse {
    fn from(result: RecommendationResult) -> Self {
        let meta = result.is_empty().then(|| MetaResponse {
            message: EMPTY_RESULT_MESSAGE.to_string(),
            suggestions: result.suggestions,
        });
        let recommendations: Vec<RecommendationResponse> = result
            .recommendations
            .into_iter()
            .map(|r| r.into())
            .collect();

        Self {
            status: "success".to_string(),
            data: RecommendationsData {
                count: recommendations.len(),
                source: result.source.into(),
                total_candidates: result.total_candidates,
                recommendations,
            },
            statistics: result.statistics.into(),
            meta,
        }
    }
}
