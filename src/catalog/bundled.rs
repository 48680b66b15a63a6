use kitchenboard_shared::{Ingredient, Recipe, RecipeCatalog};
use rust_embed::RustEmbed;

use super::{CatalogError, CatalogSource};

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

const BUNDLED_FILE: &str = "recipes.json";

/// Catalog compiled into the binary. Never fails: a missing or broken
/// `recipes.json` degrades to [`builtin_catalog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
    pub fn embedded() -> Result<RecipeCatalog, CatalogError> {
        let file = Assets::get(BUNDLED_FILE).ok_or_else(|| {
            CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{BUNDLED_FILE} is not embedded"),
            ))
        })?;

        Ok(serde_json::from_slice(&file.data)?)
    }
}

#[async_trait::async_trait]
impl CatalogSource for BundledSource {
    async fn load_catalog(&self) -> Result<RecipeCatalog, CatalogError> {
        match Self::embedded() {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                tracing::warn!(error = %e, "bundled catalog unusable, using built-in recipes");
                Ok(builtin_catalog())
            }
        }
    }
}

fn recipe(title: &str, ingredients: &[&str], steps: &[&str]) -> Recipe {
    let recipe = ingredients
        .iter()
        .fold(Recipe::new(title), |r, name| {
            r.with_ingredient(Ingredient::named(*name))
        });
    steps.iter().fold(recipe, |r, step| r.with_step(*step))
}

/// Smallest catalog that still fills every slot.
pub fn builtin_catalog() -> RecipeCatalog {
    RecipeCatalog::default()
        .with_category(
            "Breakfast",
            vec![
                recipe("Toast", &["Bread", "Butter"], &["Toast bread.", "Spread butter."]),
                recipe("Eggs", &["Eggs", "Salt"], &["Boil or scramble eggs.", "Season."]),
            ],
        )
        .with_category(
            "Lunch",
            vec![
                recipe(
                    "Sandwich",
                    &["Bread", "Ham", "Cheese"],
                    &["Layer ingredients.", "Serve."],
                ),
                recipe("Salad", &["Lettuce", "Tomato"], &["Chop and mix."]),
            ],
        )
        .with_category(
            "Dinner",
            vec![
                recipe("Pasta", &["Pasta", "Sauce"], &["Cook pasta.", "Add sauce."]),
                recipe(
                    "Rice Bowl",
                    &["Rice", "Veggies"],
                    &["Cook rice.", "Top with veggies."],
                ),
            ],
        )
        .with_category(
            "Spare",
            vec![
                recipe("Fruit", &["Apple", "Banana"], &["Slice and serve."]),
                recipe("Crackers", &["Crackers"], &["Open package."]),
            ],
        )
}
