use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Named meal slot, used both as a catalog key and a time-of-day label.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum MealCategory {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Spare,
}

impl MealCategory {
    /// The slot that follows this one in a day, wrapping Spare back to Breakfast.
    pub fn next(self) -> Self {
        match self {
            MealCategory::Breakfast => MealCategory::Lunch,
            MealCategory::Lunch => MealCategory::Dinner,
            MealCategory::Dinner => MealCategory::Spare,
            MealCategory::Spare => MealCategory::Breakfast,
        }
    }
}
