use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MealPlanError {
    #[error("Invalid rotation days: {0}, must be at least 1")]
    InvalidRotationDays(i64),

    #[error("Rotation days must be a finite number")]
    NonFiniteRotationDays,

    #[error("Invalid hour of day: {0}")]
    InvalidHour(u8),

    #[error("Invalid meal window for {category}: {start}..={end}")]
    InvalidWindow {
        category: String,
        start: u8,
        end: u8,
    },
}
