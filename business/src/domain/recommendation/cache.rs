use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use super::model::{RecommendationResult, UserRequest};

pub const DEFAULT_TTL_SECS: i64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    city: String,
    max_price: u32,
    top_k: usize,
}

impl CacheKey {
    pub fn for_request(request: &UserRequest) -> Self {
        Self {
            city: request.city().trim().to_lowercase(),
            max_price: request.max_price(),
            top_k: request.top_k(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedResult {
    result: RecommendationResult,
    generation: u64,
    stored_at: DateTime<Utc>,
}

/// Completed results keyed by normalised request.
///
/// Entries expire after the TTL and are ignored once the store they were
/// computed from has been replaced. Only outcomes that depend on the request
/// and the store alone are stored, so concurrent writers for the same key are
/// allowed to race and the last write wins.
pub struct RecommendationCache {
    entries: RwLock<HashMap<CacheKey, CachedResult>>,
    ttl: Duration,
}

impl RecommendationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, key: &CacheKey, generation: u64) -> Option<RecommendationResult> {
        self.get_at(key, generation, Utc::now())
    }

    fn get_at(
        &self,
        key: &CacheKey,
        generation: u64,
        now: DateTime<Utc>,
    ) -> Option<RecommendationResult> {
        let entries = self.entries.read().ok()?;
        let cached = entries.get(key)?;
        if cached.generation != generation || now - cached.stored_at >= self.ttl {
            return None;
        }
        Some(cached.result.clone())
    }

    pub fn insert(&self, key: CacheKey, generation: u64, result: RecommendationResult) {
        self.insert_at(key, generation, result, Utc::now());
    }

    fn insert_at(
        &self,
        key: CacheKey,
        generation: u64,
        result: RecommendationResult,
        now: DateTime<Utc>,
    ) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, cached| {
                cached.generation == generation && now - cached.stored_at < self.ttl
            });
            entries.insert(
                key,
                CachedResult {
                    result,
                    generation,
                    stored_at: now,
                },
            );
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecommendationCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}
