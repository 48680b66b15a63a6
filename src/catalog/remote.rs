use std::time::Duration;

use kitchenboard_shared::RecipeCatalog;

use super::{CatalogError, CatalogSource};

/// Catalog document served over HTTP. Always hits the network.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CatalogSource for RemoteSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn load_catalog(&self) -> Result<RecipeCatalog, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let text = response.text().await?;
        let catalog = RecipeCatalog::from_json(&text)?;

        tracing::info!(recipes = catalog.recipe_count(), "remote catalog fetched");

        Ok(catalog)
    }
}
