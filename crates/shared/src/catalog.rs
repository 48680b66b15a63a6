use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::recipe::Recipe;

pub const DEFAULT_ROTATION_DAYS: f64 = 4.0;

/// Recipes of one meal category, in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRecipes {
    pub name: String,
    pub recipes: Vec<Recipe>,
}

/// Immutable snapshot of every recipe grouped by meal category.
///
/// Category order follows the source document and recipe order inside a
/// category defines rotation addressing, so both are kept as loaded.
/// `rotation_days` is stored raw, as any JSON number; clamping it is the
/// planner's job.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeCatalog {
    rotation_days: f64,
    categories: Vec<CategoryRecipes>,
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_DAYS)
    }
}

impl RecipeCatalog {
    pub fn new(rotation_days: impl Into<f64>) -> Self {
        Self {
            rotation_days: rotation_days.into(),
            categories: vec![],
        }
    }

    /// Appends a category, replacing any earlier one with the same name in place.
    pub fn with_category(mut self, name: impl Into<String>, recipes: Vec<Recipe>) -> Self {
        self.insert(name.into(), recipes);
        self
    }

    fn insert(&mut self, name: String, recipes: Vec<Recipe>) {
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.recipes = recipes,
            None => self.categories.push(CategoryRecipes { name, recipes }),
        }
    }

    pub fn rotation_days(&self) -> f64 {
        self.rotation_days
    }

    /// Recipes of a category, empty when the catalog does not have it.
    pub fn category(&self, name: &str) -> &[Recipe] {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.recipes.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryRecipes> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.recipes.is_empty())
    }

    pub fn recipe_count(&self) -> usize {
        self.categories.iter().map(|c| c.recipes.len()).sum()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Category map that keeps document order.
struct Categories(Vec<CategoryRecipes>);

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Categories;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of meal category to recipe list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut catalog = RecipeCatalog::default();
                while let Some((name, recipes)) = map.next_entry::<String, Vec<Recipe>>()? {
                    catalog.insert(name, recipes);
                }
                Ok(Categories(catalog.categories))
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

struct CategoriesRef<'a>(&'a [CategoryRecipes]);

impl Serialize for CategoriesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in self.0 {
            map.serialize_entry(&category.name, &category.recipes)?;
        }
        map.end()
    }
}

/// Accepted document shapes: `{ "rotation_days": 4, "recipes": {..} }`, or
/// the bare category map used by the first dashboard versions. The presence
/// of a `recipes` key selects the wrapped shape.
impl<'de> Deserialize<'de> for RecipeCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = RecipeCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a recipe catalog object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut rotation_days = None;
                let mut recipes: Option<Categories> = None;
                let mut others: Vec<(String, serde_json::Value)> = vec![];

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "rotation_days" | "rotationDays" => {
                            rotation_days = Some(map.next_value::<f64>()?);
                        }
                        "recipes" => recipes = Some(map.next_value()?),
                        _ => others.push((key, map.next_value()?)),
                    }
                }

                let mut catalog =
                    RecipeCatalog::new(rotation_days.unwrap_or(DEFAULT_ROTATION_DAYS));

                match recipes {
                    Some(recipes) => catalog.categories = recipes.0,
                    None => {
                        for (name, value) in others {
                            let recipes = serde_json::from_value::<Vec<Recipe>>(value).map_err(|e| {
                                <A::Error as de::Error>::custom(format!("category `{name}`: {e}"))
                            })?;
                            catalog.insert(name, recipes);
                        }
                    }
                }

                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

impl Serialize for RecipeCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RecipeCatalog", 2)?;
        state.serialize_field("rotation_days", &self.rotation_days)?;
        state.serialize_field("recipes", &CategoriesRef(&self.categories))?;
        state.end()
    }
}
