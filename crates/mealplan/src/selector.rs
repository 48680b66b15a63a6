use kitchenboard_shared::Recipe;

/// Recipes shown per category per day.
pub const RECIPES_PER_DAY: usize = 2;

/// Picks the day's recipes for one category.
///
/// Returns `min(2, len)` consecutive recipes starting at
/// `(day_index * 2) % len`, wrapping around the end of the list.
pub fn select_for_category(recipes: &[Recipe], day_index: u32) -> Vec<&Recipe> {
    select_count(recipes, day_index, RECIPES_PER_DAY)
}

/// General form of [`select_for_category`] with a custom per-day count.
pub fn select_count<T>(items: &[T], day_index: u32, count: usize) -> Vec<&T> {
    let len = items.len();
    if len == 0 {
        return vec![];
    }

    // (day_index * count) % len without overflowing on large indexes
    let start = ((day_index as usize % len) * (count % len)) % len;

    (0..count.min(len))
        .map(|i| &items[(start + i) % len])
        .collect()
}
