use poem_openapi::Object;

use business::domain::restaurant::use_cases::reload::ReloadSummary;

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct CitiesResponse {
    pub status: String,
    pub count: usize,
    /// Sorted, distinct city names
    pub cities: Vec<String>,
}

impl From<Vec<String>> for CitiesResponse {
    fn from(cities: Vec<String>) -> Self {
        Self {
            status: "success".to_string(),
            count: cities.len(),
            cities,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct ReloadResponse {
    pub status: String,
    /// Number of restaurants in the published dataset
    pub restaurants: usize,
    pub generation: u64,
}

impl From<ReloadSummary> for ReloadResponse {
    fn from(summary: ReloadSummary) -> Self {
        Self {
            status: "success".to_string(),
            restaurants: summary.restaurants,
            generation: summary.generation,
        }
    }
}
