#[derive(Debug, thiserror::Error)]
pub enum RestaurantError {
    #[error("restaurant.name_empty")]
    NameEmpty,
    #[error("restaurant.invalid_rating")]
    InvalidRating,
    #[error("restaurant.duplicate_id")]
    DuplicateId(super::model::RestaurantId),
    #[error("restaurant.store_unavailable")]
    StoreUnavailable,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
