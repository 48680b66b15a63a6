use kitchenboard_shared::{MealCategory, Recipe, RecipeCatalog};
use serde::Serialize;
use time::{Date, Duration, PrimitiveDateTime};

use crate::{
    MealPeriodPolicy, MealPlanError, RotationDays, RotationOverride, rotation_index_with,
    select_for_category,
};

/// Recipes chosen for one category on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMeal {
    pub category: String,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub date: Date,
    pub rotation_index: u32,
    pub meals: Vec<PlannedMeal>,
}

impl DayPlan {
    pub fn meal(&self, category: &str) -> &[Recipe] {
        self.meals
            .iter()
            .find(|m| m.category == category)
            .map(|m| m.recipes.as_slice())
            .unwrap_or(&[])
    }

    /// Every selected recipe with its category, in category then recipe order.
    pub fn recipes(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        self.meals
            .iter()
            .flat_map(|m| m.recipes.iter().map(move |r| (m.category.as_str(), r)))
    }
}

/// Plans `horizon_days` days starting at `today`, one [`DayPlan`] per day.
///
/// The output depends only on the arguments: the same catalog, anchor and
/// override always produce the same plan. Fails only when the catalog's
/// `rotation_days` is not a finite number.
pub fn generate_plan(
    catalog: &RecipeCatalog,
    today: Date,
    horizon_days: u32,
    rotation: Option<RotationOverride>,
) -> Result<Vec<DayPlan>, MealPlanError> {
    let rotation_days = RotationDays::from_f64(catalog.rotation_days())?;

    let plan: Vec<DayPlan> = (0..i64::from(horizon_days))
        .map_while(|offset| today.checked_add(Duration::days(offset)))
        .map(|date| plan_day(catalog, date, rotation_days, rotation))
        .collect();

    tracing::debug!(
        today = %today,
        horizon_days,
        rotation_days = rotation_days.get(),
        days = plan.len(),
        "meal plan generated"
    );

    Ok(plan)
}

fn plan_day(
    catalog: &RecipeCatalog,
    date: Date,
    rotation_days: RotationDays,
    rotation: Option<RotationOverride>,
) -> DayPlan {
    let rotation_index = rotation_index_with(date, rotation_days, rotation);

    let meals = catalog
        .categories()
        .map(|category| PlannedMeal {
            category: category.name.clone(),
            recipes: select_for_category(&category.recipes, rotation_index)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    DayPlan {
        date,
        rotation_index,
        meals,
    }
}

/// The recipes of a single meal slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSelection {
    pub date: Date,
    pub category: MealCategory,
    pub rotation_index: u32,
    pub recipes: Vec<Recipe>,
}

impl SlotSelection {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Selection for `category` on `date`. A category missing from the catalog
/// yields an empty selection.
pub fn select_slot(
    catalog: &RecipeCatalog,
    date: Date,
    category: MealCategory,
    rotation: Option<RotationOverride>,
) -> Result<SlotSelection, MealPlanError> {
    let rotation_days = RotationDays::from_f64(catalog.rotation_days())?;
    let rotation_index = rotation_index_with(date, rotation_days, rotation);

    Ok(SlotSelection {
        date,
        category,
        rotation_index,
        recipes: select_for_category(catalog.category(category.as_ref()), rotation_index)
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// What to cook right now.
pub fn current_slot(
    catalog: &RecipeCatalog,
    now: PrimitiveDateTime,
    policy: &MealPeriodPolicy,
    rotation: Option<RotationOverride>,
) -> Result<SlotSelection, MealPlanError> {
    let category = policy.current(now.hour())?;

    select_slot(catalog, now.date(), category, rotation)
}

/// The meal after the current one.
///
/// A Breakfast coming up after noon belongs to the next day.
pub fn next_slot(
    catalog: &RecipeCatalog,
    now: PrimitiveDateTime,
    policy: &MealPeriodPolicy,
    rotation: Option<RotationOverride>,
) -> Result<SlotSelection, MealPlanError> {
    let category = policy.next(now.hour())?;

    let date = if category == MealCategory::Breakfast && now.hour() >= 12 {
        now.date().next_day().unwrap_or(now.date())
    } else {
        now.date()
    };

    select_slot(catalog, date, category, rotation)
}
