use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use business::domain::errors::RepositoryError;
use business::domain::restaurant::model::{NewRestaurantProps, Restaurant, RestaurantId};

/// Restaurants read from a dataset file, plus the rows that were rejected.
#[derive(Debug)]
pub struct ParsedDataset {
    pub restaurants: Vec<Restaurant>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// One row of the preprocessed dataset. Accepts both the service's own field
/// names and the column names produced by the preprocessing step.
#[derive(Debug, Deserialize)]
struct RestaurantRecord {
    #[serde(default, alias = "restaurant_id")]
    id: Option<f64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default, alias = "rate")]
    rating: Option<f64>,
    #[serde(default, alias = "votes")]
    vote_count: Option<f64>,
    #[serde(default, alias = "price")]
    price_for_two: Option<f64>,
    #[serde(default)]
    cuisines: Option<ListField>,
    #[serde(default, alias = "rest_type")]
    restaurant_type: Option<String>,
    #[serde(default, alias = "dish_liked")]
    popular_dishes: Option<ListField>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    online_order: Option<Flag>,
    #[serde(default, alias = "book_table")]
    table_booking: Option<Flag>,
}

/// Either a JSON list or a single string such as `"North Indian, Chinese"`
/// or `"['Biryani', 'Kebab']"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField {
    List(Vec<String>),
    Text(String),
}

impl ListField {
    fn into_vec(self) -> Vec<String> {
        match self {
            ListField::List(items) => items,
            ListField::Text(text) => text
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// `true`/`false` or the dataset's `"Yes"`/`"No"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn as_bool(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Text(text) => matches!(
                text.trim().to_lowercase().as_str(),
                "yes" | "true" | "1" | "y"
            ),
        }
    }
}

/// Parses a dataset document: a JSON array of records, or an object with a
/// `restaurants` array.
///
/// Rows that cannot be turned into a valid restaurant are skipped and
/// reported; only an unreadable document is an error.
pub fn parse_dataset(text: &str) -> Result<ParsedDataset, RepositoryError> {
    let document: Value =
        serde_json::from_str(text).map_err(|_| RepositoryError::invalid_data())?;

    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("restaurants") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(RepositoryError::invalid_data()),
        },
        _ => return Err(RepositoryError::invalid_data()),
    };

    let mut restaurants = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    let mut ids = HashSet::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let restaurant = serde_json::from_value::<RestaurantRecord>(row)
            .map_err(|e| e.to_string())
            .and_then(|record| into_restaurant(record, index));

        match restaurant {
            Ok(restaurant) if ids.insert(restaurant.id) => restaurants.push(restaurant),
            Ok(restaurant) => skipped.push(SkippedRecord {
                index,
                reason: format!("duplicate id {}", restaurant.id),
            }),
            Err(reason) => skipped.push(SkippedRecord { index, reason }),
        }
    }

    Ok(ParsedDataset {
        restaurants,
        skipped,
    })
}

fn into_restaurant(record: RestaurantRecord, index: usize) -> Result<Restaurant, String> {
    let id = match record.id {
        Some(id) => to_u64(id).ok_or_else(|| "invalid id".to_string())?,
        None => index as u64 + 1,
    };
    let price_for_two = record
        .price_for_two
        .and_then(to_u64)
        .and_then(|p| u32::try_from(p).ok())
        .ok_or_else(|| "missing or invalid price".to_string())?;
    let vote_count = record
        .vote_count
        .and_then(to_u64)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0);

    Restaurant::new(NewRestaurantProps {
        id: RestaurantId::new(id),
        name: record.name.unwrap_or_default(),
        city: record.city.unwrap_or_default(),
        location: record.location.unwrap_or_default(),
        rating: record.rating.unwrap_or(0.0) as f32,
        vote_count,
        price_for_two,
        cuisines: record.cuisines.map(ListField::into_vec).unwrap_or_default(),
        restaurant_type: record.restaurant_type.unwrap_or_default(),
        popular_dishes: record
            .popular_dishes
            .map(ListField::into_vec)
            .unwrap_or_default(),
        address: record.address.unwrap_or_default(),
        phone: record.phone.unwrap_or_default(),
        online_order: record.online_order.is_some_and(|f| f.as_bool()),
        table_booking: record.table_booking.is_some_and(|f| f.as_bool()),
    })
    .map_err(|e| e.to_string())
}

/// Whole, non-negative numbers only; exported tables often write `800.0`.
fn to_u64(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_records_with_service_field_names() {
        let text = r#"[{
            "id": 1,
            "name": "Jalsa",
            "city": "Banashankari",
            "location": "Banashankari",
            "rating": 4.1,
            "vote_count": 775,
            "price_for_two": 800,
            "cuisines": ["North Indian", "Mughlai", "Chinese"],
            "restaurant_type": "Casual Dining",
            "popular_dishes": ["Pasta", "Lunch Buffet"],
            "online_order": true,
            "table_booking": true
        }]"#;

        let parsed = parse_dataset(text).unwrap();

        assert!(parsed.skipped.is_empty());
        let jalsa = &parsed.restaurants[0];
        assert_eq!(jalsa.id, RestaurantId::new(1));
        assert_eq!(jalsa.vote_count, 775);
        assert_eq!(jalsa.price_for_two, 800);
        assert_eq!(jalsa.cuisines.len(), 3);
        assert!(jalsa.table_booking);
    }

    #[test]
    fn should_accept_preprocessing_column_names() {
        let text = r#"{"restaurants": [{
            "restaurant_id": 12.0,
            "name": "Spice Elephant",
            "city": "Banashankari",
            "location": "Banashankari",
            "rate": 4.1,
            "votes": 787.0,
            "price": 800.0,
            "cuisines": "Chinese, North Indian, Thai",
            "rest_type": "Casual Dining",
            "dish_liked": "['Momos', 'Lunch Buffet']",
            "online_order": "Yes",
            "book_table": "No"
        }]}"#;

        let parsed = parse_dataset(text).unwrap();

        let restaurant = &parsed.restaurants[0];
        assert_eq!(restaurant.id, RestaurantId::new(12));
        assert_eq!(restaurant.vote_count, 787);
        assert_eq!(
            restaurant.cuisines,
            vec!["Chinese".to_string(), "North Indian".to_string(), "Thai".to_string()]
        );
        assert_eq!(
            restaurant.popular_dishes,
            vec!["Momos".to_string(), "Lunch Buffet".to_string()]
        );
        assert_eq!(restaurant.restaurant_type, "Casual Dining");
        assert!(restaurant.online_order);
        assert!(!restaurant.table_booking);
    }

    #[test]
    fn should_default_missing_rating_votes_and_id() {
        let text = r#"[{"name": "New Place", "city": "BTM", "price": 300, "rate": null}]"#;

        let parsed = parse_dataset(text).unwrap();

        let restaurant = &parsed.restaurants[0];
        assert_eq!(restaurant.id, RestaurantId::new(1));
        assert_eq!(restaurant.rating, 0.0);
        assert_eq!(restaurant.vote_count, 0);
    }

    #[test]
    fn should_skip_invalid_rows_and_keep_the_rest() {
        let text = r#"[
            {"id": 1, "name": "", "price": 300},
            {"id": 2, "name": "No Price"},
            {"id": 3, "name": "Bad Rating", "price": 300, "rating": 7.5},
            {"id": 4, "name": "Good", "price": 300, "rating": 4.0},
            {"id": 4, "name": "Clone", "price": 300, "rating": 4.0},
            "not an object"
        ]"#;

        let parsed = parse_dataset(text).unwrap();

        assert_eq!(parsed.restaurants.len(), 1);
        assert_eq!(parsed.restaurants[0].name, "Good");
        let skipped: Vec<usize> = parsed.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![0, 1, 2, 4, 5]);
        assert_eq!(parsed.skipped[3].reason, "duplicate id 4");
    }

    #[test]
    fn should_reject_unreadable_document() {
        assert!(matches!(
            parse_dataset("not json"),
            Err(RepositoryError::InvalidData)
        ));
        assert!(matches!(
            parse_dataset(r#"{"items": []}"#),
            Err(RepositoryError::InvalidData)
        ));
    }
}
