use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Amount of an ingredient as it appears in a catalog.
///
/// Catalog authors write either a number (`2`, `0.5`) or free text
/// (`"pinch"`, `"to taste"`). Merged entries that cannot be summed also end
/// up as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Amount(f64),
    Text(String),
}

impl Quantity {
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Quantity::Amount(v) => Some(*v),
            Quantity::Text(_) => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Amount(v) => write!(f, "{v}"),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Amount(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Accepts a bare string (older catalogs) or `{name, qty?, unit?}`.
///
/// `qty` and `unit` take any JSON value: numbers stay numeric, everything
/// else is kept as text so one odd entry does not reject the whole catalog.
impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IngredientVisitor;

        impl<'de> Visitor<'de> for IngredientVisitor {
            type Value = Ingredient;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an ingredient name or an object with a name")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
                Ok(Ingredient::named(name))
            }

            fn visit_string<E: de::Error>(self, name: String) -> Result<Self::Value, E> {
                Ok(Ingredient::named(name))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut name = None;
                let mut qty = None;
                let mut unit = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value::<String>()?),
                        "qty" => qty = lenient_quantity(map.next_value()?),
                        "unit" => unit = lenient_text(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }

                Ok(Ingredient {
                    name: name.ok_or_else(|| <A::Error as de::Error>::missing_field("name"))?,
                    qty,
                    unit,
                })
            }
        }

        deserializer.deserialize_any(IngredientVisitor)
    }
}

fn lenient_quantity(value: Value) -> Option<Quantity> {
    match value {
        Value::Number(n) => n.as_f64().map(Quantity::Amount),
        other => lenient_text(other).map(Quantity::Text),
    }
}

fn lenient_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl Ingredient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: None,
            unit: None,
        }
    }

    pub fn new(name: impl Into<String>, qty: impl Into<Quantity>, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        Self {
            name: name.into(),
            qty: Some(qty.into()),
            unit: (!unit.is_empty()).then_some(unit),
        }
    }

    /// Unit with absent treated as empty, which is how merges compare units.
    pub fn unit_str(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }

    /// Lower-cased, trimmed name used to merge the same ingredient across recipes.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    pub fn display_line(&self) -> String {
        ingredient_line(self.qty.as_ref(), self.unit_str(), &self.name)
    }
}

pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// `"<qty> <unit> <name>"`, dropping whatever is missing.
///
/// Shared by recipe cards and grocery lines so both read the same way.
pub fn ingredient_line(qty: Option<&Quantity>, unit: &str, name: &str) -> String {
    let qty = qty.map(Quantity::to_string).unwrap_or_default();

    [qty.trim(), unit.trim(), name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, alias = "prep_notes", skip_serializing_if = "Option::is_none")]
    pub prep_notes: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prep_notes: None,
            ingredients: vec![],
            steps: vec![],
        }
    }

    pub fn with_prep_notes(mut self, notes: impl Into<String>) -> Self {
        self.prep_notes = Some(notes.into());
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Prep note with surrounding whitespace removed, `None` when blank.
    pub fn prep_note(&self) -> Option<&str> {
        self.prep_notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}
