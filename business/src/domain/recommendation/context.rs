use std::cmp::Ordering;

use crate::domain::restaurant::filter::CandidateSet;
use crate::domain::restaurant::model::Restaurant;

pub const DEFAULT_MAX_RESTAURANTS: usize = 50;
/// Roughly 3k tokens at ~4 characters per token.
pub const DEFAULT_MAX_CHARS: usize = 12_000;
const MAX_DISHES: usize = 5;
const EMPTY_CONTEXT: &str = "No restaurants available.";

/// Limits on how much restaurant data is sent to the model per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextBudget {
    pub max_restaurants: usize,
    pub max_chars: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            max_restaurants: DEFAULT_MAX_RESTAURANTS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Serialized candidate summary embedded in the user prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    text: String,
    included: usize,
}

impl PromptContext {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of restaurant records in the text.
    pub fn included(&self) -> usize {
        self.included
    }
}

/// Ordering shared with the fallback ranker: rating, then votes, both
/// descending.
pub fn by_rating_then_votes(a: &Restaurant, b: &Restaurant) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.vote_count.cmp(&a.vote_count))
}

/// Builds the bounded, deterministic context for a candidate set.
///
/// The best `max_restaurants` candidates are kept, one line each, and lines
/// are appended only while the whole text fits in `max_chars`.
pub fn build_context(candidates: &CandidateSet<'_>, budget: &ContextBudget) -> PromptContext {
    if candidates.is_empty() {
        return PromptContext {
            text: EMPTY_CONTEXT.to_string(),
            included: 0,
        };
    }

    let mut ordered: Vec<&Restaurant> = candidates.iter().collect();
    ordered.sort_by(|a, b| by_rating_then_votes(a, b));
    ordered.truncate(budget.max_restaurants);

    let mut text = String::new();
    let mut included = 0;
    for restaurant in ordered {
        let line = format_record(restaurant);
        let separator = usize::from(!text.is_empty());
        if text.len() + separator + line.len() > budget.max_chars {
            break;
        }
        if separator == 1 {
            text.push('\n');
        }
        text.push_str(&line);
        included += 1;
    }

    PromptContext { text, included }
}

/// One restaurant per line, fixed field order.
pub fn format_record(restaurant: &Restaurant) -> String {
    let cuisines = restaurant
        .cuisines
        .iter()
        .map(|c| sanitize(c))
        .collect::<Vec<_>>()
        .join(", ");
    let dishes = restaurant
        .popular_dishes
        .iter()
        .take(MAX_DISHES)
        .map(|d| sanitize(d))
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!(
        "{} | Rating: {:.1} | Votes: {} | Price: {} | Type: {} | Cuisines: {}",
        sanitize(&restaurant.name),
        restaurant.rating,
        restaurant.vote_count,
        restaurant.price_for_two,
        or_na(&sanitize(&restaurant.restaurant_type)),
        or_na(&cuisines),
    );
    if !dishes.is_empty() {
        line.push_str(" | Popular dishes: ");
        line.push_str(&dishes);
    }
    line
}

/// Field separators and line breaks inside values would break the
/// one-record-per-line layout. Names are shown to the model in this form.
pub(crate) fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '|' => '/',
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}
