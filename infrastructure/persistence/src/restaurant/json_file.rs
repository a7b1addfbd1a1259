use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::logger::Logger;
use business::domain::restaurant::model::Restaurant;
use business::domain::restaurant::repository::RestaurantRepository;

use super::dataset::parse_dataset;

/// Reads the preprocessed dataset from a JSON file on every load.
pub struct RestaurantRepositoryJson {
    path: PathBuf,
    logger: Arc<dyn Logger>,
}

impl RestaurantRepositoryJson {
    pub fn new(path: impl Into<PathBuf>, logger: Arc<dyn Logger>) -> Self {
        Self {
            path: path.into(),
            logger,
        }
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantRepositoryJson {
    async fn all_restaurants(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            self.logger.error(&format!(
                "Failed to read dataset {}: {}",
                self.path.display(),
                e
            ));
            match e.kind() {
                ErrorKind::NotFound => RepositoryError::not_found(),
                _ => RepositoryError::database_error(),
            }
        })?;

        let parsed = parse_dataset(&text).map_err(|e| {
            self.logger.error(&format!(
                "Dataset {} is not a JSON list of restaurants",
                self.path.display()
            ));
            e
        })?;

        for skipped in &parsed.skipped {
            self.logger.warn(&format!(
                "Skipping dataset record {}: {}",
                skipped.index, skipped.reason
            ));
        }
        self.logger.info(&format!(
            "Read {} restaurants from {} ({} skipped)",
            parsed.restaurants.len(),
            self.path.display(),
            parsed.skipped.len()
        ));

        Ok(parsed.restaurants)
    }
}
