use kitchenboard_shared::MealCategory;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::MealPlanError;

/// Canonical hour bands, first match wins.
///
/// `<10` Breakfast, `<15` Lunch, `<21` Dinner, anything later is Spare.
pub fn meal_period(hour: u8) -> MealCategory {
    if hour < 10 {
        MealCategory::Breakfast
    } else if hour < 15 {
        MealCategory::Lunch
    } else if hour < 21 {
        MealCategory::Dinner
    } else {
        MealCategory::Spare
    }
}

/// Inclusive hour range for a meal, wrapping past midnight when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWindow {
    pub category: MealCategory,
    pub start: u8,
    pub end: u8,
}

impl MealWindow {
    pub fn new(category: MealCategory, start: u8, end: u8) -> Self {
        Self {
            category,
            start,
            end,
        }
    }

    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, hour: u8) -> bool {
        if self.wraps() {
            hour >= self.start || hour <= self.end
        } else {
            hour >= self.start && hour <= self.end
        }
    }
}

/// Config-facing name of a [`MealPeriodPolicy`].
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealPeriodKind {
    #[default]
    HourBands,
    Windows,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MealPeriodPolicy {
    #[default]
    HourBands,
    Windows(Vec<MealWindow>),
}

impl MealPeriodPolicy {
    pub fn from_kind(kind: MealPeriodKind) -> Self {
        match kind {
            MealPeriodKind::HourBands => MealPeriodPolicy::HourBands,
            MealPeriodKind::Windows => MealPeriodPolicy::Windows(Self::default_windows()),
        }
    }

    /// Breakfast 5-10, Lunch 11-14, Dinner 17-21, Spare 22-4.
    pub fn default_windows() -> Vec<MealWindow> {
        vec![
            MealWindow::new(MealCategory::Breakfast, 5, 10),
            MealWindow::new(MealCategory::Lunch, 11, 14),
            MealWindow::new(MealCategory::Dinner, 17, 21),
            MealWindow::new(MealCategory::Spare, 22, 4),
        ]
    }

    pub fn windows(windows: Vec<MealWindow>) -> Result<Self, MealPlanError> {
        if let Some(w) = windows.iter().find(|w| w.start > 23 || w.end > 23) {
            return Err(MealPlanError::InvalidWindow {
                category: w.category.to_string(),
                start: w.start,
                end: w.end,
            });
        }

        Ok(MealPeriodPolicy::Windows(windows))
    }

    /// Meal slot for the given hour.
    ///
    /// With windows, an hour that falls in a gap resolves to the first
    /// window's meal.
    pub fn current(&self, hour: u8) -> Result<MealCategory, MealPlanError> {
        check_hour(hour)?;

        let category = match self {
            MealPeriodPolicy::HourBands => meal_period(hour),
            MealPeriodPolicy::Windows(windows) => windows
                .iter()
                .find(|w| w.contains(hour))
                .or_else(|| windows.first())
                .map(|w| w.category)
                .unwrap_or_default(),
        };

        Ok(category)
    }

    /// Meal slot that comes up after the given hour.
    pub fn next(&self, hour: u8) -> Result<MealCategory, MealPlanError> {
        let current = self.current(hour)?;

        let windows = match self {
            MealPeriodPolicy::HourBands => return Ok(current.next()),
            MealPeriodPolicy::Windows(windows) => windows,
        };

        if windows.is_empty() {
            return Ok(current.next());
        }

        let upcoming = windows.iter().find(|w| {
            if w.wraps() {
                hour < w.start && hour > w.end
            } else {
                hour < w.start
            }
        });

        if let Some(w) = upcoming {
            return Ok(w.category);
        }

        let position = windows
            .iter()
            .position(|w| w.category == current)
            .map(|i| i + 1)
            .unwrap_or(0);

        Ok(windows[position % windows.len()].category)
    }
}

fn check_hour(hour: u8) -> Result<(), MealPlanError> {
    if hour > 23 {
        return Err(MealPlanError::InvalidHour(hour));
    }

    Ok(())
}
