use std::collections::BTreeMap;

use kitchenboard_shared::{Quantity, ingredient_line};
use serde::Serialize;

use crate::CheckedItems;

/// One grocery line after merging every occurrence of an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub key: String,
    /// Casing of the first occurrence.
    pub name: String,
    pub qty: Option<Quantity>,
    pub unit: String,
    pub occurrences: u32,
}

impl AggregatedIngredient {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.qty, Some(Quantity::Text(_)))
    }

    pub fn display_line(&self) -> String {
        ingredient_line(self.qty.as_ref(), &self.unit, &self.name)
    }
}

/// Aggregated ingredients keyed by normalized name, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    items: BTreeMap<String, AggregatedIngredient>,
}

/// A shopping list line with the user's checkbox state layered on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListRow<'a> {
    pub item: &'a AggregatedIngredient,
    pub checked: bool,
}

impl ShoppingList {
    pub(crate) fn entry(&mut self, key: &str) -> Option<&mut AggregatedIngredient> {
        self.items.get_mut(key)
    }

    pub(crate) fn insert(&mut self, item: AggregatedIngredient) {
        self.items.insert(item.key.clone(), item);
    }

    pub fn get(&self, key: &str) -> Option<&AggregatedIngredient> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedIngredient> {
        self.items.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn with_checked(&self, checked: &CheckedItems) -> Vec<ShoppingListRow<'_>> {
        self.iter()
            .map(|item| ShoppingListRow {
                item,
                checked: checked.is_checked(&item.key),
            })
            .collect()
    }

    /// Plain-text export, one display line per item.
    pub fn export_text(&self) -> String {
        self.iter()
            .map(AggregatedIngredient::display_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
