use std::collections::{BTreeSet, HashSet};

use super::errors::RestaurantError;
use super::model::Restaurant;

pub const MAX_PARTIAL_SUGGESTIONS: usize = 5;
pub const MAX_DEFAULT_SUGGESTIONS: usize = 10;

/// Immutable, in-memory view over the loaded dataset.
///
/// Built once per load and shared behind an `Arc`; nothing mutates it after
/// construction, so any number of requests may read it concurrently.
#[derive(Debug)]
pub struct RestaurantStore {
    restaurants: Vec<Restaurant>,
    generation: u64,
}

impl RestaurantStore {
    /// Fails with `DuplicateId` if two records share an id.
    ///
    /// The store starts at generation 0; the catalog assigns the real one
    /// when it is published.
    pub fn new(restaurants: Vec<Restaurant>) -> Result<Self, RestaurantError> {
        let mut ids = HashSet::with_capacity(restaurants.len());
        for restaurant in &restaurants {
            if !ids.insert(restaurant.id) {
                return Err(RestaurantError::DuplicateId(restaurant.id));
            }
        }

        Ok(Self {
            restaurants,
            generation: 0,
        })
    }

    pub(super) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn all_restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Load counter; bumped on every reload so cached results from an older
    /// dataset can be recognised.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sorted, de-duplicated list of non-empty city values.
    pub fn cities(&self) -> Vec<String> {
        self.restaurants
            .iter()
            .map(|r| r.city.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted, de-duplicated city and location values; requests may name
    /// either.
    pub fn places(&self) -> Vec<String> {
        self.restaurants
            .iter()
            .flat_map(|r| [r.city.trim(), r.location.trim()])
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Places to offer when a request for `query` found nothing.
    ///
    /// Empty when `query` already names a known place, since then the price
    /// filter excluded everything. Otherwise places sharing a word with the
    /// query, or the first few known places when none do.
    pub fn suggest_places(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        let places = self.places();
        if !needle.is_empty() && places.iter().any(|p| p.to_lowercase().contains(&needle)) {
            return vec![];
        }

        let words: Vec<&str> = needle
            .split_whitespace()
            .filter(|w| w.chars().count() >= 3)
            .collect();
        let partial: Vec<String> = places
            .iter()
            .filter(|place| {
                let place = place.to_lowercase();
                needle.contains(&place) || words.iter().any(|w| place.contains(w))
            })
            .take(MAX_PARTIAL_SUGGESTIONS)
            .cloned()
            .collect();

        if partial.is_empty() {
            places.into_iter().take(MAX_DEFAULT_SUGGESTIONS).collect()
        } else {
            partial
        }
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}
