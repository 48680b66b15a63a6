use kitchenboard_shared::RecipeCatalog;
use serde::Serialize;
use strum::{AsRefStr, Display};

use super::{BundledSource, CachedSource, CatalogError, CatalogSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Remote,
    Cache,
    Bundled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    pub catalog: RecipeCatalog,
    pub origin: CatalogOrigin,
}

/// Remote, then the on-disk cache, then the copy shipped with the binary.
///
/// The remote is any [`CatalogSource`]; the binary plugs in
/// [`super::RemoteSource`].
pub struct FallbackChain {
    pub remote: Option<Box<dyn CatalogSource>>,
    pub cache: CachedSource,
    pub bundled: BundledSource,
}

impl FallbackChain {
    pub fn new(remote: Option<Box<dyn CatalogSource>>, cache: CachedSource) -> Self {
        Self {
            remote,
            cache,
            bundled: BundledSource,
        }
    }

    /// Regular startup load.
    ///
    /// A good remote document refreshes the cache. When the cache is missing
    /// the bundled catalog seeds it.
    pub async fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        if let Some(loaded) = self.try_remote().await? {
            return Ok(loaded);
        }

        match self.cache.load_catalog().await {
            Ok(catalog) => {
                tracing::info!(path = %self.cache.path().display(), "catalog loaded from cache");
                return Ok(LoadedCatalog {
                    catalog,
                    origin: CatalogOrigin::Cache,
                });
            }
            Err(CatalogError::NotFound(_)) => {}
            Err(e) => tracing::warn!(error = %e, "catalog cache unreadable"),
        }

        self.use_bundled().await
    }

    /// Manual refresh: remote or bundled, never the old cache.
    pub async fn refresh(&self) -> Result<LoadedCatalog, CatalogError> {
        if let Some(loaded) = self.try_remote().await? {
            return Ok(loaded);
        }

        self.use_bundled().await
    }

    async fn try_remote(&self) -> Result<Option<LoadedCatalog>, CatalogError> {
        let Some(remote) = &self.remote else {
            return Ok(None);
        };

        match remote.load_catalog().await {
            Ok(catalog) => {
                self.cache.store(&catalog).await?;
                Ok(Some(LoadedCatalog {
                    catalog,
                    origin: CatalogOrigin::Remote,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote catalog unavailable");
                Ok(None)
            }
        }
    }

    async fn use_bundled(&self) -> Result<LoadedCatalog, CatalogError> {
        let catalog = self.bundled.load_catalog().await?;
        self.cache.store(&catalog).await?;

        tracing::info!("catalog loaded from bundled recipes");

        Ok(LoadedCatalog {
            catalog,
            origin: CatalogOrigin::Bundled,
        })
    }
}
