//! Plain-text views printed by the commands.

use std::io::{Result, Write};

use kitchenboard_mealplan::{DayPlan, PrepItem, SlotSelection};
use kitchenboard_shared::Recipe;
use kitchenboard_shopping::ShoppingListRow;

pub const EMPTY_SLOT: &str = "No recipe for this meal.";
pub const NO_PREP: &str = "No prep needed in next 48 hours.";

pub fn recipe(out: &mut impl Write, recipe: &Recipe) -> Result<()> {
    writeln!(out, "## {}", recipe.title)?;
    if let Some(note) = recipe.prep_note() {
        writeln!(out, "Prep: {note}")?;
    }

    if !recipe.ingredients.is_empty() {
        writeln!(out, "Ingredients:")?;
        for ingredient in &recipe.ingredients {
            writeln!(out, "  - {}", ingredient.display_line())?;
        }
    }

    if !recipe.steps.is_empty() {
        writeln!(out, "Steps:")?;
        for (n, step) in recipe.steps.iter().enumerate() {
            writeln!(out, "  {}. {step}", n + 1)?;
        }
    }

    Ok(())
}

pub fn slot(out: &mut impl Write, slot: &SlotSelection) -> Result<()> {
    writeln!(
        out,
        "# {} - {} {}",
        slot.category,
        slot.date.weekday(),
        slot.date
    )?;

    if slot.is_empty() {
        return writeln!(out, "{EMPTY_SLOT}");
    }

    for (n, r) in slot.recipes.iter().enumerate() {
        if n > 0 {
            writeln!(out)?;
        }
        recipe(out, r)?;
    }

    Ok(())
}

/// One line per recipe: title and ingredient count.
pub fn slot_summary(out: &mut impl Write, label: &str, slot: &SlotSelection) -> Result<()> {
    writeln!(out, "{label}: {} ({})", slot.category, slot.date)?;

    if slot.is_empty() {
        return writeln!(out, "  {EMPTY_SLOT}");
    }

    for r in &slot.recipes {
        writeln!(out, "  {} ({} ingredients)", r.title, r.ingredients.len())?;
    }

    Ok(())
}

pub fn plan(out: &mut impl Write, plan: &[DayPlan]) -> Result<()> {
    for (n, day) in plan.iter().enumerate() {
        if n > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{} {}", day.date.weekday(), day.date)?;

        for meal in &day.meals {
            let titles: Vec<_> = meal.recipes.iter().map(|r| r.title.as_str()).collect();
            let titles = if titles.is_empty() {
                "-".to_owned()
            } else {
                titles.join(", ")
            };
            writeln!(out, "  {:<10} {titles}", meal.category)?;
        }
    }

    Ok(())
}

pub fn grocery(out: &mut impl Write, rows: &[ShoppingListRow<'_>]) -> Result<()> {
    if rows.is_empty() {
        return writeln!(out, "Nothing to buy.");
    }

    for row in rows {
        let mark = if row.checked { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}", row.item.display_line())?;
    }

    Ok(())
}

pub fn prep(out: &mut impl Write, items: &[PrepItem]) -> Result<()> {
    if items.is_empty() {
        return writeln!(out, "{NO_PREP}");
    }

    for item in items {
        writeln!(out, "{} ({} - {})", item.title, item.meal, item.date)?;
        writeln!(out, "  Prep: {}", item.note)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use kitchenboard_shared::{Ingredient, MealCategory};
    use time::macros::date;

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_recipe() {
        let r = Recipe::new("Pancakes")
            .with_prep_notes("Rest batter")
            .with_ingredient(Ingredient::new("Flour", 1.0, "cup"))
            .with_ingredient(Ingredient::new("Eggs", 2.0, ""))
            .with_ingredient(Ingredient::named("Salt"))
            .with_step("Mix")
            .with_step("Fry");

        assert_eq!(
            render(|out| recipe(out, &r)),
            "## Pancakes\nPrep: Rest batter\nIngredients:\n  - 1 cup Flour\n  - 2 Eggs\n  - Salt\nSteps:\n  1. Mix\n  2. Fry\n"
        );
    }

    #[test]
    fn test_empty_slot_placeholder() {
        let selection = SlotSelection {
            date: date!(2025-05-05),
            category: MealCategory::Spare,
            rotation_index: 1,
            recipes: vec![],
        };

        assert_eq!(
            render(|out| slot(out, &selection)),
            "# Spare - Monday 2025-05-05\nNo recipe for this meal.\n"
        );
    }

    #[test]
    fn test_no_prep_message() {
        assert_eq!(render(|out| prep(out, &[])), format!("{NO_PREP}\n"));
    }
}
