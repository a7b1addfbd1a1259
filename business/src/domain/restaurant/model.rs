use serde::{Deserialize, Serialize};

use super::errors::RestaurantError;

pub const MAX_RATING: f32 = 5.0;

/// Identifier of a restaurant inside the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestaurantId(u64);

impl RestaurantId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RestaurantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A restaurant record from the preprocessed dataset.
///
/// Records are loaded once and never mutated afterwards; the store hands out
/// shared references only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub city: String,
    pub location: String,
    pub rating: f32,
    pub vote_count: u32,
    pub price_for_two: u32,
    pub cuisines: Vec<String>,
    pub restaurant_type: String,
    pub popular_dishes: Vec<String>,
    pub address: String,
    pub phone: String,
    pub online_order: bool,
    pub table_booking: bool,
}

pub struct NewRestaurantProps {
    pub id: RestaurantId,
    pub name: String,
    pub city: String,
    pub location: String,
    pub rating: f32,
    pub vote_count: u32,
    pub price_for_two: u32,
    pub cuisines: Vec<String>,
    pub restaurant_type: String,
    pub popular_dishes: Vec<String>,
    pub address: String,
    pub phone: String,
    pub online_order: bool,
    pub table_booking: bool,
}

impl Restaurant {
    pub fn new(props: NewRestaurantProps) -> Result<Self, RestaurantError> {
        let name = props.name.trim().to_string();
        if name.is_empty() {
            return Err(RestaurantError::NameEmpty);
        }

        if !props.rating.is_finite() || !(0.0..=MAX_RATING).contains(&props.rating) {
            return Err(RestaurantError::InvalidRating);
        }

        Ok(Self {
            id: props.id,
            name,
            city: props.city.trim().to_string(),
            location: props.location.trim().to_string(),
            rating: props.rating,
            vote_count: props.vote_count,
            price_for_two: props.price_for_two,
            cuisines: dedupe_cuisines(props.cuisines),
            restaurant_type: props.restaurant_type.trim().to_string(),
            popular_dishes: props
                .popular_dishes
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
            address: props.address.trim().to_string(),
            phone: props.phone.trim().to_string(),
            online_order: props.online_order,
            table_booking: props.table_booking,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(props: NewRestaurantProps) -> Self {
        Self {
            id: props.id,
            name: props.name,
            city: props.city,
            location: props.location,
            rating: props.rating,
            vote_count: props.vote_count,
            price_for_two: props.price_for_two,
            cuisines: props.cuisines,
            restaurant_type: props.restaurant_type,
            popular_dishes: props.popular_dishes,
            address: props.address,
            phone: props.phone,
            online_order: props.online_order,
            table_booking: props.table_booking,
        }
    }
}

/// Cuisines behave as a set: case-insensitive duplicates are removed while
/// keeping the first-seen spelling and order.
fn dedupe_cuisines(cuisines: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    cuisines
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn props(name: &str, rating: f32) -> NewRestaurantProps {
        NewRestaurantProps {
            id: RestaurantId::new(1),
            name: name.to_string(),
            city: " Bangalore ".to_string(),
            location: "Jayanagar".to_string(),
            rating,
            vote_count: 10,
            price_for_two: 400,
            cuisines: vec![
                "Cafe".to_string(),
                "cafe".to_string(),
                " ".to_string(),
                "Desserts".to_string(),
            ],
            restaurant_type: "Cafe".to_string(),
            popular_dishes: vec!["Waffles".to_string(), "".to_string()],
            address: String::new(),
            phone: String::new(),
            online_order: false,
            table_booking: true,
        }
    }

    #[test]
    fn should_create_restaurant_when_props_valid() {
        let restaurant = Restaurant::new(props("Third Wave Coffee", 4.3)).unwrap();

        assert_eq!(restaurant.name, "Third Wave Coffee");
        assert_eq!(restaurant.city, "Bangalore");
        assert_eq!(restaurant.popular_dishes, vec!["Waffles".to_string()]);
    }

    #[test]
    fn should_dedupe_cuisines_case_insensitively() {
        let restaurant = Restaurant::new(props("Third Wave Coffee", 4.3)).unwrap();

        assert_eq!(
            restaurant.cuisines,
            vec!["Cafe".to_string(), "Desserts".to_string()]
        );
    }

    #[test]
    fn should_reject_when_name_only_whitespace() {
        let result = Restaurant::new(props("   ", 4.0));

        assert!(matches!(result.unwrap_err(), RestaurantError::NameEmpty));
    }

    #[test]
    fn should_reject_rating_outside_scale() {
        assert!(matches!(
            Restaurant::new(props("Too Good", 5.5)).unwrap_err(),
            RestaurantError::InvalidRating
        ));
        assert!(matches!(
            Restaurant::new(props("Negative", -0.1)).unwrap_err(),
            RestaurantError::InvalidRating
        ));
        assert!(matches!(
            Restaurant::new(props("Unknown", f32::NAN)).unwrap_err(),
            RestaurantError::InvalidRating
        ));
    }

    #[test]
    fn should_accept_rating_bounds() {
        assert!(Restaurant::new(props("New Place", 0.0)).is_ok());
        assert!(Restaurant::new(props("Perfect Place", 5.0)).is_ok());
    }
}
