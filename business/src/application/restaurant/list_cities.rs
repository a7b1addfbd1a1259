use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::restaurant::catalog::RestaurantCatalog;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::use_cases::list_cities::ListCitiesUseCase;

pub struct ListCitiesUseCaseImpl {
    pub catalog: Arc<RestaurantCatalog>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListCitiesUseCase for ListCitiesUseCaseImpl {
    async fn execute(&self) -> Result<Vec<String>, RestaurantError> {
        let store = self
            .catalog
            .snapshot()
            .ok_or(RestaurantError::StoreUnavailable)?;

        let cities = store.cities();
        self.logger.debug(&format!("Listing {} cities", cities.len()));

        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::model::fixtures::restaurant_in;
    use crate::domain::restaurant::store::RestaurantStore;
    use mockall::mock;

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_list_distinct_sorted_cities() {
        let catalog = RestaurantCatalog::new();
        catalog.publish(
            RestaurantStore::new(
                vec![
                    restaurant_in(1, "A", "Mumbai", "Bandra", 4.0, 10, 300),
                    restaurant_in(2, "B", "Bangalore", "BTM", 4.0, 10, 300),
                    restaurant_in(3, "C", "Mumbai", "Juhu", 4.0, 10, 300),
                ],
            )
            .unwrap(),
        );
        let use_case = ListCitiesUseCaseImpl {
            catalog: Arc::new(catalog),
            logger: mock_logger(),
        };

        let cities = use_case.execute().await.unwrap();

        assert_eq!(cities, vec!["Bangalore".to_string(), "Mumbai".to_string()]);
    }

    #[tokio::test]
    async fn should_fail_when_store_is_not_loaded() {
        let use_case = ListCitiesUseCaseImpl {
            catalog: Arc::new(RestaurantCatalog::new()),
            logger: mock_logger(),
        };

        let result = use_case.execute().await;

        assert!(matches!(result, Err(RestaurantError::StoreUnavailable)));
    }
}
