use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::MealPlanError;

/// Length of the rotation cycle in days, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationDays(NonZeroU32);

impl RotationDays {
    /// Rejects anything below 1 instead of guessing a replacement.
    pub fn new(days: i64) -> Result<Self, MealPlanError> {
        u32::try_from(days)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(MealPlanError::InvalidRotationDays(days))
    }

    /// Caller-side clamp for untrusted catalog values.
    pub fn clamped(days: i64) -> Self {
        let days = days.clamp(1, i64::from(u32::MAX)) as u32;
        Self(NonZeroU32::new(days).unwrap_or(NonZeroU32::MIN))
    }

    /// Clamp for catalog values, which are any JSON number.
    ///
    /// Fractions are truncated and the result is clamped like [`Self::clamped`].
    /// Non-finite input is a caller bug and is rejected.
    pub fn from_f64(days: f64) -> Result<Self, MealPlanError> {
        if !days.is_finite() {
            return Err(MealPlanError::NonFiniteRotationDays);
        }

        Ok(Self::clamped(days.trunc() as i64))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for RotationDays {
    fn default() -> Self {
        Self::clamped(kitchenboard_shared::DEFAULT_ROTATION_DAYS as i64)
    }
}

/// Manual shift applied on top of the date-derived index.
///
/// Replaces the "advance day" button: callers persist the shift and pass it
/// in, so generation stays a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationOverride {
    pub shift: u32,
}

impl RotationOverride {
    pub fn new(shift: u32) -> Self {
        Self { shift }
    }
}

/// Cycle position of `date`: day of month modulo the rotation length.
pub fn rotation_index(date: Date, rotation_days: RotationDays) -> u32 {
    u32::from(date.day()) % rotation_days.get()
}

/// Same as [`rotation_index`] with an optional manual shift.
pub fn rotation_index_with(
    date: Date,
    rotation_days: RotationDays,
    rotation: Option<RotationOverride>,
) -> u32 {
    let shift = rotation.map(|r| u64::from(r.shift)).unwrap_or(0);
    let days = u64::from(rotation_days.get());

    ((u64::from(date.day()) + shift) % days) as u32
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn test_index_is_day_of_month_modulo() {
        let days = RotationDays::new(4).unwrap();
        assert_eq!(rotation_index(date!(2025-03-01), days), 1);
        assert_eq!(rotation_index(date!(2025-03-04), days), 0);
        assert_eq!(rotation_index(date!(2025-03-31), days), 3);
    }

    #[test]
    fn test_index_always_in_range() {
        for n in 1..=40 {
            let days = RotationDays::new(n).unwrap();
            let mut date = date!(2024-01-01);
            for _ in 0..366 {
                assert!(rotation_index(date, days) < days.get());
                date = date.next_day().unwrap();
            }
        }
    }

    #[test]
    fn test_rotation_days_rejects_non_positive() {
        assert_eq!(
            RotationDays::new(0),
            Err(MealPlanError::InvalidRotationDays(0))
        );
        assert_eq!(
            RotationDays::new(-3),
            Err(MealPlanError::InvalidRotationDays(-3))
        );
    }

    #[test]
    fn test_clamped_never_zero() {
        assert_eq!(RotationDays::clamped(0).get(), 1);
        assert_eq!(RotationDays::clamped(-10).get(), 1);
        assert_eq!(RotationDays::clamped(6).get(), 6);
    }

    #[test]
    fn test_from_f64_clamps_finite_and_rejects_non_finite() {
        assert_eq!(
            RotationDays::from_f64(f64::NAN),
            Err(MealPlanError::NonFiniteRotationDays)
        );
        assert_eq!(
            RotationDays::from_f64(f64::INFINITY),
            Err(MealPlanError::NonFiniteRotationDays)
        );
        assert_eq!(RotationDays::from_f64(4.7).unwrap().get(), 4);
        assert_eq!(RotationDays::from_f64(0.5).unwrap().get(), 1);
        assert_eq!(RotationDays::from_f64(-2.0).unwrap().get(), 1);
    }

    #[test]
    fn test_override_shifts_index() {
        let days = RotationDays::new(4).unwrap();
        let date = date!(2025-03-03);

        assert_eq!(rotation_index_with(date, days, None), 3);
        assert_eq!(
            rotation_index_with(date, days, Some(RotationOverride::new(1))),
            0
        );
        assert_eq!(
            rotation_index_with(date, days, Some(RotationOverride::new(u32::MAX))),
            ((3 + u64::from(u32::MAX)) % 4) as u32
        );
    }
}
