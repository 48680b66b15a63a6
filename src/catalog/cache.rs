use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kitchenboard_shared::RecipeCatalog;

use super::{CatalogError, CatalogSource};

/// Last good catalog, kept on disk as JSON.
#[derive(Debug, Clone)]
pub struct CachedSource {
    path: PathBuf,
}

impl CachedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot. Readers never see a half-written file.
    pub async fn store(&self, catalog: &RecipeCatalog) -> Result<(), CatalogError> {
        let json = catalog.to_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "catalog cache written");

        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogSource for CachedSource {
    async fn load_catalog(&self) -> Result<RecipeCatalog, CatalogError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(RecipeCatalog::from_json(&json)?)
    }
}
