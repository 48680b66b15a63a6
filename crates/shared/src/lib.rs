mod catalog;
mod meal;
pub mod recipe;

pub use catalog::*;
pub use meal::*;
pub use recipe::{Ingredient, Quantity, Recipe, ingredient_line, normalize_key};
