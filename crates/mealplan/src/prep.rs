use serde::Serialize;
use time::Date;

use crate::DayPlan;

/// A recipe that needs work before its meal slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrepItem {
    pub date: Date,
    pub meal: String,
    pub title: String,
    pub note: String,
}

/// Prep notes due today or tomorrow, in plan order.
pub fn prep_ahead_items(plan: &[DayPlan], today: Date) -> Vec<PrepItem> {
    let tomorrow = today.next_day();

    plan.iter()
        .filter(|day| day.date == today || Some(day.date) == tomorrow)
        .flat_map(|day| {
            day.recipes().filter_map(move |(meal, recipe)| {
                recipe.prep_note().map(|note| PrepItem {
                    date: day.date,
                    meal: meal.to_owned(),
                    title: recipe.title.clone(),
                    note: note.to_owned(),
                })
            })
        })
        .collect()
}
