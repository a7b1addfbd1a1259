use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::logger::Logger;
use business::domain::restaurant::model::Restaurant;
use business::domain::restaurant::repository::RestaurantRepository;

use super::entity::RestaurantEntity;

pub struct RestaurantRepositoryPostgres {
    pool: PgPool,
    logger: Arc<dyn Logger>,
}

impl RestaurantRepositoryPostgres {
    pub fn new(pool: PgPool, logger: Arc<dyn Logger>) -> Self {
        Self { pool, logger }
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantRepositoryPostgres {
    async fn all_restaurants(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let entities = sqlx::query_as::<_, RestaurantEntity>(
            "SELECT id, name, city, location, rating, vote_count, price_for_two, cuisines, restaurant_type, popular_dishes, address, phone, online_order, table_booking FROM restaurants ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            self.logger.error(&format!("Failed to query restaurants: {}", e));
            RepositoryError::DatabaseError
        })?;

        let mut restaurants = Vec::with_capacity(entities.len());
        for entity in entities {
            let id = entity.id;
            match entity.into_domain() {
                Ok(restaurant) => restaurants.push(restaurant),
                Err(e) => self
                    .logger
                    .warn(&format!("Skipping restaurant row {}: {}", id, e)),
            }
        }

        Ok(restaurants)
    }
}
