use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kitchenboard_mealplan::RotationOverride;
use kitchenboard_shopping::CheckedItems;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Everything the dashboard remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub checked: CheckedItems,
    #[serde(default)]
    pub rotation_shift: u32,
}

/// JSON file backed key-value store.
///
/// Mutations only touch memory; call [`LocalStore::save`] to persist.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    data: StoreData,
}

impl LocalStore {
    /// Opens the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let data = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    pub fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.data)?;

        // Temp file then rename, as in the catalog cache.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    pub fn checked_items(&self) -> &CheckedItems {
        &self.data.checked
    }

    /// Returns `true` when the state changed.
    pub fn set_checked(&mut self, key: &str, checked: bool) -> bool {
        self.data.checked.set(key, checked)
    }

    pub fn clear_checked(&mut self) -> usize {
        self.data.checked.clear()
    }

    /// `None` until the rotation was advanced at least once.
    pub fn rotation_override(&self) -> Option<RotationOverride> {
        (self.data.rotation_shift > 0).then(|| RotationOverride::new(self.data.rotation_shift))
    }

    pub fn advance_rotation(&mut self) -> u32 {
        self.data.rotation_shift = self.data.rotation_shift.wrapping_add(1);
        self.data.rotation_shift
    }

    pub fn reset_rotation(&mut self) {
        self.data.rotation_shift = 0;
    }
}
