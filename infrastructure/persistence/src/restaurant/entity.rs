use sqlx::FromRow;

use business::domain::errors::RepositoryError;
use business::domain::restaurant::model::{NewRestaurantProps, Restaurant, RestaurantId};

#[derive(Debug, FromRow)]
pub struct RestaurantEntity {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: String,
    pub rating: f32,
    pub vote_count: i32,
    pub price_for_two: i32,
    pub cuisines: Vec<String>,
    pub restaurant_type: String,
    pub popular_dishes: Vec<String>,
    pub address: String,
    pub phone: String,
    pub online_order: bool,
    pub table_booking: bool,
}

impl RestaurantEntity {
    /// Negative ids, votes or prices cannot come from a valid load.
    pub fn into_domain(self) -> Result<Restaurant, RepositoryError> {
        let id = u64::try_from(self.id).map_err(|_| RepositoryError::invalid_data())?;
        let vote_count =
            u32::try_from(self.vote_count).map_err(|_| RepositoryError::invalid_data())?;
        let price_for_two =
            u32::try_from(self.price_for_two).map_err(|_| RepositoryError::invalid_data())?;

        Ok(Restaurant::from_repository(NewRestaurantProps {
            id: RestaurantId::new(id),
            name: self.name,
            city: self.city,
            location: self.location,
            rating: self.rating,
            vote_count,
            price_for_two,
            cuisines: self.cuisines,
            restaurant_type: self.restaurant_type,
            popular_dishes: self.popular_dishes,
            address: self.address,
            phone: self.phone,
            online_order: self.online_order,
            table_booking: self.table_booking,
        }))
    }
}
