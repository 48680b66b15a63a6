use std::collections::BTreeSet;

use kitchenboard_shared::normalize_key;
use serde::{Deserialize, Serialize};

/// Grocery keys the user has ticked off.
///
/// Keys go through the same normalization as aggregation, so `"Milk "` and
/// `"milk"` refer to the same line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckedItems(BTreeSet<String>);

impl CheckedItems {
    /// Returns `true` when the key was not checked before.
    pub fn check(&mut self, key: &str) -> bool {
        self.0.insert(normalize_key(key))
    }

    /// Returns `true` when the key was checked before.
    pub fn uncheck(&mut self, key: &str) -> bool {
        self.0.remove(&normalize_key(key))
    }

    pub fn set(&mut self, key: &str, checked: bool) -> bool {
        if checked {
            self.check(key)
        } else {
            self.uncheck(key)
        }
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.0.contains(&normalize_key(key))
    }

    pub fn clear(&mut self) -> usize {
        let count = self.0.len();
        self.0.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
