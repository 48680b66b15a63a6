//! Where the recipe catalog comes from.
//!
//! The planner only ever sees a [`RecipeCatalog`]. Fetching, caching and the
//! bundled copy live here, behind [`CatalogSource`].

mod bundled;
mod cache;
mod chain;
mod remote;

use std::path::PathBuf;

use kitchenboard_shared::RecipeCatalog;
use thiserror::Error;

pub use bundled::{BundledSource, builtin_catalog};
pub use cache::CachedSource;
pub use chain::{CatalogOrigin, FallbackChain, LoadedCatalog};
pub use remote::RemoteSource;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("Catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No cached catalog at {}", .0.display())]
    NotFound(PathBuf),
}

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_catalog(&self) -> Result<RecipeCatalog, CatalogError>;
}
