pub mod aggregation;
mod checked;
mod list;

pub use aggregation::{IngredientAggregationService, aggregate};
pub use checked::*;
pub use list::*;
