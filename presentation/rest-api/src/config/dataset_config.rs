use std::path::PathBuf;
use std::sync::Arc;

use business::domain::logger::Logger;
use business::domain::restaurant::repository::RestaurantRepository;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::restaurant::json_file::RestaurantRepositoryJson;
use persistence::restaurant::repository::RestaurantRepositoryPostgres;

use super::{env_lookup, non_blank};

#[derive(Debug, thiserror::Error)]
pub enum DatasetConfigError {
    #[error("config.dataset_missing: set DATASET_PATH or DATABASE_URL")]
    Missing,
}

/// Where the restaurant dataset is loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetConfig {
    JsonFile(PathBuf),
    Postgres {
        url: String,
        migrations_path: Option<String>,
    },
}

impl DatasetConfig {
    /// Environment variables:
    /// - DATASET_PATH: JSON dataset file (takes precedence)
    /// - DATABASE_URL: PostgreSQL connection string
    /// - DATABASE_MIGRATIONS_PATH: optional migrations directory, run at startup
    pub fn from_env() -> Result<Self, DatasetConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub(crate) fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DatasetConfigError> {
        if let Some(path) = non_blank(lookup, "DATASET_PATH") {
            return Ok(DatasetConfig::JsonFile(PathBuf::from(path)));
        }
        match non_blank(lookup, "DATABASE_URL") {
            Some(url) => Ok(DatasetConfig::Postgres {
                url,
                migrations_path: non_blank(lookup, "DATABASE_MIGRATIONS_PATH"),
            }),
            None => Err(DatasetConfigError::Missing),
        }
    }

    /// Builds the repository adapter, connecting to the database if needed.
    pub async fn init_repository(
        &self,
        logger: Arc<dyn Logger>,
    ) -> anyhow::Result<Arc<dyn RestaurantRepository>> {
        match self {
            DatasetConfig::JsonFile(path) => {
                Ok(Arc::new(RestaurantRepositoryJson::new(path.clone(), logger)))
            }
            DatasetConfig::Postgres {
                url,
                migrations_path,
            } => {
                let pool = create_postgres_pool(&DatabaseConfig::new(url.clone())).await?;
                if let Some(path) = migrations_path {
                    run_migrations(&pool, path).await?;
                }
                Ok(Arc::new(RestaurantRepositoryPostgres::new(pool, logger)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_lookup;

    #[test]
    fn should_prefer_json_dataset_path() {
        let lookup = map_lookup(&[
            ("DATASET_PATH", "data/restaurants.json"),
            ("DATABASE_URL", "postgres://localhost/db"),
        ]);

        let config = DatasetConfig::from_lookup(&lookup).unwrap();

        assert_eq!(
            config,
            DatasetConfig::JsonFile(PathBuf::from("data/restaurants.json"))
        );
    }

    #[test]
    fn should_use_database_when_no_path_is_set() {
        let lookup = map_lookup(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_MIGRATIONS_PATH", "migrations"),
        ]);

        let config = DatasetConfig::from_lookup(&lookup).unwrap();

        assert_eq!(
            config,
            DatasetConfig::Postgres {
                url: "postgres://localhost/db".to_string(),
                migrations_path: Some("migrations".to_string()),
            }
        );
    }

    #[test]
    fn should_fail_without_any_source() {
        let result = DatasetConfig::from_lookup(&map_lookup(&[("DATASET_PATH", " ")]));

        assert!(matches!(result, Err(DatasetConfigError::Missing)));
    }
}
