use std::sync::{Arc, RwLock};

use super::store::RestaurantStore;

/// Holds the currently published store.
///
/// Requests take an `Arc` snapshot and release the lock straight away, so a
/// reload never blocks or disturbs requests that are already running.
#[derive(Default)]
pub struct RestaurantCatalog {
    current: RwLock<Option<Arc<RestaurantStore>>>,
}

impl RestaurantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` until a store has been published.
    pub fn snapshot(&self) -> Option<Arc<RestaurantStore>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Publishes a new store, replacing the previous one, and returns the
    /// generation it was given.
    ///
    /// Generations are assigned under the write lock, so concurrent publishes
    /// never share one.
    pub fn publish(&self, store: RestaurantStore) -> u64 {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let generation = guard.as_ref().map(|s| s.generation()).unwrap_or(0) + 1;
        *guard = Some(Arc::new(store.with_generation(generation)));
        generation
    }

    /// Generation of the published store, or 0 when nothing is loaded.
    pub fn generation(&self) -> u64 {
        self.snapshot().map(|s| s.generation()).unwrap_or(0)
    }
}
