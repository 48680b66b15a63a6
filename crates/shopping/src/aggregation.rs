use kitchenboard_mealplan::DayPlan;
use kitchenboard_shared::{Ingredient, Quantity};

use crate::{AggregatedIngredient, ShoppingList};

/// Ingredient Aggregation Service
///
/// Stateless domain service that turns a meal plan into a shopping list by
/// merging every occurrence of the same ingredient.
///
/// - "Flour 1 cup" + "flour 2 cup" = "flour 3 cup" (case-insensitive, same unit)
/// - "salt 1 tsp" + "salt pinch" = "salt 1 tsp + pinch" (kept as text, never dropped)
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate every ingredient of every selected recipe, in plan order.
    pub fn aggregate(plan: &[DayPlan]) -> ShoppingList {
        let ingredients = plan
            .iter()
            .flat_map(|day| day.recipes())
            .flat_map(|(_, recipe)| recipe.ingredients.iter());

        let list = Self::aggregate_ingredients(ingredients);

        tracing::debug!(
            days = plan.len(),
            items = list.len(),
            "shopping list aggregated"
        );

        list
    }

    pub fn aggregate_ingredients<'a>(
        ingredients: impl IntoIterator<Item = &'a Ingredient>,
    ) -> ShoppingList {
        let mut list = ShoppingList::default();

        for ingredient in ingredients {
            let key = ingredient.key();

            match list.entry(&key) {
                Some(existing) => Self::merge(existing, ingredient),
                None => list.insert(AggregatedIngredient {
                    key,
                    name: ingredient.name.clone(),
                    qty: ingredient.qty.clone(),
                    unit: ingredient.unit_str().to_owned(),
                    occurrences: 1,
                }),
            }
        }

        list
    }

    /// Merge a later occurrence into the stored entry.
    ///
    /// Numeric quantities with equal units (empty counts as a unit) are summed
    /// and rounded to 2 decimals. Anything else degrades to a text quantity
    /// that lists both sides with their units. A side with neither quantity
    /// nor unit carries nothing and leaves the other side as it is.
    fn merge(existing: &mut AggregatedIngredient, incoming: &Ingredient) {
        existing.occurrences += 1;

        let amounts = (
            existing.qty.as_ref().and_then(Quantity::as_amount),
            incoming.qty.as_ref().and_then(Quantity::as_amount),
        );

        if let (Some(a), Some(b)) = amounts {
            if existing.unit == incoming.unit_str() {
                existing.qty = Some(Quantity::Amount(round_2(a + b)));
                return;
            }
        }

        let old = describe(existing.qty.as_ref(), &existing.unit);
        let new = describe(incoming.qty.as_ref(), incoming.unit_str());

        if new.is_empty() {
            return;
        }

        if old.is_empty() {
            existing.qty = incoming.qty.clone();
            existing.unit = incoming.unit_str().to_owned();
            return;
        }

        let text = format!("{old} + {new}");
        tracing::trace!(key = %existing.key, merged = %text, "ambiguous quantities");

        existing.qty = Some(Quantity::Text(text));
        existing.unit = String::new();
    }
}

/// Shorthand for [`IngredientAggregationService::aggregate`].
pub fn aggregate(plan: &[DayPlan]) -> ShoppingList {
    IngredientAggregationService::aggregate(plan)
}

/// `"<qty> <unit>"` with missing parts left out, empty when both are missing.
fn describe(qty: Option<&Quantity>, unit: &str) -> String {
    let qty = qty.map(Quantity::to_string).unwrap_or_default();
    match (qty.trim(), unit.trim()) {
        (qty, "") => qty.to_owned(),
        ("", unit) => unit.to_owned(),
        (qty, unit) => format!("{qty} {unit}"),
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
