//! Command handlers behind the `kitchenboard` binary.
//!
//! Handlers write to any [`std::io::Write`] so tests can capture output.

pub mod render;

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use kitchenboard_mealplan::{
    DayPlan, MealPeriodPolicy, MealPlanError, RotationOverride, current_slot, generate_plan,
    next_slot, prep_ahead_items,
};
use kitchenboard_shopping::{ShoppingList, aggregate};
use time::PrimitiveDateTime;

use crate::catalog::{CachedSource, CatalogSource, FallbackChain, LoadedCatalog, RemoteSource};
use crate::config::Config;
use crate::error::AppError;
use crate::store::LocalStore;

/// Builds the catalog source chain described by the config.
pub fn fallback_chain(config: &Config) -> Result<FallbackChain, AppError> {
    let remote = match &config.catalog.remote_url {
        Some(url) => {
            let remote = RemoteSource::new(url.clone(), config.catalog.timeout())?;
            tracing::debug!(url = remote.url(), "remote catalog configured");
            Some(Box::new(remote) as Box<dyn CatalogSource>)
        }
        None => None,
    };

    Ok(FallbackChain::new(
        remote,
        CachedSource::new(&config.catalog.cache_path),
    ))
}

/// Everything a read-only command needs, captured once per run.
pub struct Dashboard {
    pub catalog: LoadedCatalog,
    pub store: LocalStore,
    pub now: PrimitiveDateTime,
    pub policy: MealPeriodPolicy,
    pub horizon_days: u32,
}

impl Dashboard {
    pub async fn load(config: &Config) -> Result<Self, AppError> {
        let catalog = fallback_chain(config)?.load().await?;
        let store = LocalStore::open(&config.storage.path)?;
        let now = crate::clock::anchor(crate::clock::now(config.planner.timezone.as_deref()));

        tracing::debug!(origin = %catalog.origin, now = %now, "dashboard loaded");

        Self::new(config, catalog, store, now)
    }

    pub fn new(
        config: &Config,
        catalog: LoadedCatalog,
        store: LocalStore,
        now: PrimitiveDateTime,
    ) -> Result<Self, AppError> {
        let policy = config
            .planner
            .meal_period_policy()
            .map_err(AppError::ValidationError)?;

        Ok(Self {
            catalog,
            store,
            now,
            policy,
            horizon_days: config.planner.horizon_days,
        })
    }

    fn rotation(&self) -> Option<RotationOverride> {
        self.store.rotation_override()
    }

    pub fn plan(&self, days: Option<u32>) -> Result<Vec<DayPlan>, MealPlanError> {
        generate_plan(
            &self.catalog.catalog,
            self.now.date(),
            days.unwrap_or(self.horizon_days),
            self.rotation(),
        )
    }

    pub fn shopping_list(&self, days: Option<u32>) -> Result<ShoppingList, MealPlanError> {
        Ok(aggregate(&self.plan(days)?))
    }
}

#[tracing::instrument(skip_all)]
pub fn today(dashboard: &Dashboard, out: &mut impl Write) -> Result<()> {
    let slot = current_slot(
        &dashboard.catalog.catalog,
        dashboard.now,
        &dashboard.policy,
        dashboard.rotation(),
    )?;

    render::slot(out, &slot)?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn dashboard(dashboard: &Dashboard, out: &mut impl Write) -> Result<()> {
    let catalog = &dashboard.catalog.catalog;
    let rotation = dashboard.rotation();

    let current = current_slot(catalog, dashboard.now, &dashboard.policy, rotation)?;
    let next = next_slot(catalog, dashboard.now, &dashboard.policy, rotation)?;

    writeln!(
        out,
        "{} {} {:02}:{:02} (catalog: {})",
        dashboard.now.weekday(),
        dashboard.now.date(),
        dashboard.now.hour(),
        dashboard.now.minute(),
        dashboard.catalog.origin
    )?;
    writeln!(out)?;
    render::slot_summary(out, "Now", &current)?;
    render::slot_summary(out, "Next", &next)?;
    writeln!(out)?;

    // Prep looks at today and tomorrow only.
    let items = prep_ahead_items(&dashboard.plan(Some(2))?, dashboard.now.date());
    render::prep(out, &items)?;

    Ok(())
}

/// Redraws the dashboard on every tick, reloading catalog, store and clock.
///
/// Runs until `ticks` redraws are done, or forever when `ticks` is `None`.
/// A failed reload is logged and retried on the next tick.
#[tracing::instrument(skip(config, out))]
pub async fn watch(
    config: &Config,
    period: Duration,
    ticks: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut drawn = 0;
    while ticks.is_none_or(|limit| drawn < limit) {
        interval.tick().await;

        match Dashboard::load(config).await {
            Ok(board) => {
                if drawn > 0 {
                    writeln!(out)?;
                }
                dashboard(&board, out)?;
                out.flush()?;
            }
            Err(e) => tracing::warn!(error = %e, "dashboard reload failed"),
        }

        drawn += 1;
    }

    Ok(())
}

#[tracing::instrument(skip(dashboard, out))]
pub fn plan(dashboard: &Dashboard, days: Option<u32>, out: &mut impl Write) -> Result<()> {
    render::plan(out, &dashboard.plan(days)?)?;

    Ok(())
}

#[tracing::instrument(skip(dashboard, out))]
pub fn grocery(dashboard: &Dashboard, days: Option<u32>, out: &mut impl Write) -> Result<()> {
    let list = dashboard.shopping_list(days)?;
    render::grocery(out, &list.with_checked(dashboard.store.checked_items()))?;

    Ok(())
}

#[tracing::instrument(skip(dashboard, out))]
pub fn export(
    dashboard: &Dashboard,
    days: Option<u32>,
    output: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let list = dashboard.shopping_list(days)?;
    std::fs::write(output, list.export_text())?;

    tracing::info!(items = list.len(), path = %output.display(), "grocery list exported");
    writeln!(out, "Exported {} items to {}", list.len(), output.display())?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn prep(dashboard: &Dashboard, out: &mut impl Write) -> Result<()> {
    let items = prep_ahead_items(&dashboard.plan(Some(2))?, dashboard.now.date());
    render::prep(out, &items)?;

    Ok(())
}

#[tracing::instrument(skip(store, out))]
pub fn set_checked(
    store: &mut LocalStore,
    key: &str,
    checked: bool,
    out: &mut impl Write,
) -> Result<()> {
    if store.set_checked(key, checked) {
        store.save()?;
    }

    let mark = if checked { "checked" } else { "unchecked" };
    writeln!(out, "{} {mark}", key.trim())?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn clear_checked(store: &mut LocalStore, out: &mut impl Write) -> Result<()> {
    let cleared = store.clear_checked();
    store.save()?;

    writeln!(out, "Cleared {cleared} checked items")?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn refresh(chain: &FallbackChain, out: &mut impl Write) -> Result<()> {
    let loaded = chain.refresh().await?;

    writeln!(
        out,
        "Catalog refreshed from {} ({} recipes)",
        loaded.origin,
        loaded.catalog.recipe_count()
    )?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn advance(store: &mut LocalStore, out: &mut impl Write) -> Result<()> {
    let shift = store.advance_rotation();
    store.save()?;

    writeln!(out, "Rotation advanced, shift is now {shift}")?;

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn reset_rotation(store: &mut LocalStore, out: &mut impl Write) -> Result<()> {
    store.reset_rotation();
    store.save()?;

    writeln!(out, "Rotation follows the calendar again")?;

    Ok(())
}
