use std::time::Duration;

use kitchenboard::catalog::{
    BundledSource, CachedSource, CatalogError, CatalogOrigin, CatalogSource, FallbackChain,
    RemoteSource,
};
use kitchenboard_shared::{Recipe, RecipeCatalog};
use temp_dir::TempDir;

/// Nothing listens on the discard port locally, so the fetch fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:9/recipes.json";

fn unreachable_remote() -> anyhow::Result<RemoteSource> {
    Ok(RemoteSource::new(UNREACHABLE, Duration::from_secs(2))?)
}

fn unreachable() -> anyhow::Result<Option<Box<dyn CatalogSource>>> {
    let remote: Box<dyn CatalogSource> = Box::new(unreachable_remote()?);
    Ok(Some(remote))
}

/// In-memory remote that always answers with the same catalog.
struct StaticSource(RecipeCatalog);

#[async_trait::async_trait]
impl CatalogSource for StaticSource {
    async fn load_catalog(&self) -> Result<RecipeCatalog, CatalogError> {
        Ok(self.0.clone())
    }
}

fn served() -> RecipeCatalog {
    RecipeCatalog::new(3)
        .with_category("Breakfast", vec![Recipe::new("Granola")])
        .with_category("Dinner", vec![Recipe::new("Risotto"), Recipe::new("Tacos")])
}

#[tokio::test]
async fn test_remote_failure_is_http_error() -> anyhow::Result<()> {
    let err = unreachable_remote()?.load_catalog().await.unwrap_err();

    assert!(matches!(err, CatalogError::Http(_)));

    Ok(())
}

#[tokio::test]
async fn test_empty_cache_falls_back_to_bundled_and_seeds_it() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));
    let chain = FallbackChain::new(unreachable()?, cache.clone());

    let loaded = chain.load().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Bundled);
    assert_eq!(loaded.catalog, BundledSource::embedded()?);
    assert_eq!(cache.load_catalog().await?, loaded.catalog);

    Ok(())
}

#[tokio::test]
async fn test_cache_wins_over_bundled_when_remote_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));
    let cached = RecipeCatalog::new(2).with_category("Lunch", vec![Recipe::new("Leftovers")]);
    cache.store(&cached).await?;

    let chain = FallbackChain::new(unreachable()?, cache);
    let loaded = chain.load().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Cache);
    assert_eq!(loaded.catalog, cached);

    Ok(())
}

#[tokio::test]
async fn test_no_remote_configured_uses_cache() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));
    let cached = RecipeCatalog::default().with_category("Dinner", vec![Recipe::new("Soup")]);
    cache.store(&cached).await?;

    let loaded = FallbackChain::new(None, cache).load().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Cache);

    Ok(())
}

#[tokio::test]
async fn test_refresh_replaces_cache_with_bundled() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));
    cache
        .store(&RecipeCatalog::new(2).with_category("Lunch", vec![Recipe::new("Stale")]))
        .await?;

    let chain = FallbackChain::new(unreachable()?, cache.clone());
    let loaded = chain.refresh().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Bundled);
    assert_eq!(cache.load_catalog().await?, BundledSource::embedded()?);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_cache_is_replaced_by_bundled() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.child("catalog.json"), "<html>oops</html>")?;
    let cache = CachedSource::new(dir.child("catalog.json"));

    let loaded = FallbackChain::new(None, cache.clone()).load().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Bundled);
    assert_eq!(cache.load_catalog().await?, loaded.catalog);

    Ok(())
}

#[tokio::test]
async fn test_remote_success_wins_and_updates_cache() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));
    cache
        .store(&RecipeCatalog::new(2).with_category("Lunch", vec![Recipe::new("Stale")]))
        .await?;

    let chain = FallbackChain::new(Some(Box::new(StaticSource(served()))), cache.clone());
    let loaded = chain.load().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Remote);
    assert_eq!(loaded.catalog, served());
    assert_eq!(cache.load_catalog().await?, served());

    Ok(())
}

#[tokio::test]
async fn test_refresh_prefers_remote_over_bundled() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cache = CachedSource::new(dir.child("catalog.json"));

    let chain = FallbackChain::new(Some(Box::new(StaticSource(served()))), cache.clone());
    let loaded = chain.refresh().await?;

    assert_eq!(loaded.origin, CatalogOrigin::Remote);
    assert_eq!(RecipeCatalog::from_json(&std::fs::read_to_string(cache.path())?)?, served());

    Ok(())
}
