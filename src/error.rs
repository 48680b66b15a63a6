use kitchenboard_mealplan::MealPlanError;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Meal planning error: {0}")]
    MealPlanError(#[from] MealPlanError),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
