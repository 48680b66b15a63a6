//! Tests for CLI command handlers

use std::time::Duration;

use kitchenboard::Config;
use kitchenboard::catalog::{CatalogOrigin, LoadedCatalog, builtin_catalog};
use kitchenboard::cli::{self, Dashboard, render};
use kitchenboard::store::LocalStore;
use kitchenboard_shared::{Ingredient, Recipe, RecipeCatalog};
use temp_dir::TempDir;
use time::PrimitiveDateTime;
use time::macros::datetime;

fn catalog() -> RecipeCatalog {
    RecipeCatalog::new(4)
        .with_category(
            "Breakfast",
            vec![
                Recipe::new("Overnight Oats")
                    .with_prep_notes("Soak oats")
                    .with_ingredient(Ingredient::new("Oats", 0.5, "cup"))
                    .with_ingredient(Ingredient::new("Milk", 1.0, "cup")),
                Recipe::new("Toast").with_ingredient(Ingredient::new("Bread", 2.0, "slice")),
            ],
        )
        .with_category(
            "Dinner",
            vec![Recipe::new("Pasta").with_ingredient(Ingredient::new("milk", 0.5, "cup"))],
        )
        .with_category("Spare", vec![])
}

fn dashboard(dir: &TempDir, now: PrimitiveDateTime) -> anyhow::Result<Dashboard> {
    let store = LocalStore::open(dir.child("store.json"))?;
    let loaded = LoadedCatalog {
        catalog: catalog(),
        origin: CatalogOrigin::Cache,
    };

    Ok(Dashboard::new(&Config::default(), loaded, store, now)?)
}

fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> anyhow::Result<String> {
    let mut out = Vec::new();
    f(&mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_today_shows_full_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let board = dashboard(&dir, datetime!(2025-06-10 07:45))?;

    let text = output(|out| cli::today(&board, out))?;

    assert!(text.starts_with("# Breakfast - Tuesday 2025-06-10\n"));
    assert!(text.contains("## Overnight Oats\nPrep: Soak oats\n"));
    assert!(text.contains("  - 0.5 cup Oats\n"));
    assert!(text.contains("## Toast\n"));

    Ok(())
}

#[test]
fn test_today_empty_slot_placeholder() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let board = dashboard(&dir, datetime!(2025-06-10 22:10))?;

    let text = output(|out| cli::today(&board, out))?;

    assert!(text.contains(render::EMPTY_SLOT));

    Ok(())
}

#[test]
fn test_dashboard_lists_now_next_and_prep() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let board = dashboard(&dir, datetime!(2025-06-10 18:00))?;

    let text = output(|out| cli::dashboard(&board, out))?;

    assert!(text.contains("(catalog: cache)"));
    assert!(text.contains("Now: Dinner (2025-06-10)\n  Pasta (1 ingredients)\n"));
    assert!(text.contains("Next: Spare (2025-06-10)\n"));
    assert!(text.contains("Overnight Oats (Breakfast - 2025-06-10)\n  Prep: Soak oats\n"));

    Ok(())
}

#[test]
fn test_grocery_marks_checked_items() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut board = dashboard(&dir, datetime!(2025-06-10 09:00))?;
    board.store.set_checked("MILK", true);

    let text = output(|out| cli::grocery(&board, Some(1), out))?;

    assert_eq!(
        text,
        "[ ] 2 slice Bread\n[x] 1.5 cup Milk\n[ ] 0.5 cup Oats\n"
    );

    Ok(())
}

#[test]
fn test_export_writes_grocery_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let board = dashboard(&dir, datetime!(2025-06-10 09:00))?;
    let path = dir.child("grocery.txt");

    let text = output(|out| cli::export(&board, Some(1), &path, out))?;

    assert_eq!(text, format!("Exported 3 items to {}\n", path.display()));
    assert_eq!(
        std::fs::read_to_string(&path)?,
        "2 slice Bread\n1.5 cup Milk\n0.5 cup Oats"
    );

    Ok(())
}

#[test]
fn test_prep_without_notes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = LocalStore::open(dir.child("store.json"))?;
    let loaded = LoadedCatalog {
        catalog: builtin_catalog(),
        origin: CatalogOrigin::Bundled,
    };
    let board = Dashboard::new(
        &Config::default(),
        loaded,
        store,
        datetime!(2025-06-10 09:00),
    )?;

    let text = output(|out| cli::prep(&board, out))?;

    assert_eq!(text, format!("{}\n", render::NO_PREP));

    Ok(())
}

#[test]
fn test_check_and_advance_persist() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("store.json");

    let mut store = LocalStore::open(&path)?;
    output(|out| cli::set_checked(&mut store, " Bread ", true, out))?;
    let advanced = output(|out| cli::advance(&mut store, out))?;
    assert_eq!(advanced, "Rotation advanced, shift is now 1\n");

    let mut reopened = LocalStore::open(&path)?;
    assert!(reopened.checked_items().is_checked("bread"));
    assert_eq!(reopened.data().rotation_shift, 1);

    let cleared = output(|out| cli::clear_checked(&mut reopened, out))?;
    assert_eq!(cleared, "Cleared 1 checked items\n");
    output(|out| cli::reset_rotation(&mut reopened, out))?;

    let last = LocalStore::open(&path)?;
    assert!(last.checked_items().is_empty());
    assert_eq!(last.rotation_override(), None);

    Ok(())
}

#[test]
fn test_advance_shifts_the_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let now = datetime!(2025-06-10 09:00);

    let before = dashboard(&dir, now)?.plan(Some(1))?;

    let mut store = LocalStore::open(dir.child("store.json"))?;
    store.advance_rotation();
    store.save()?;

    let after = dashboard(&dir, now)?.plan(Some(1))?;

    assert_eq!(before[0].rotation_index, 2);
    assert_eq!(after[0].rotation_index, 3);

    Ok(())
}

#[tokio::test]
async fn test_watch_redraws_on_every_tick() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut config = Config::default();
    config.catalog.cache_path = dir.child("catalog.json").display().to_string();
    config.storage.path = dir.child("store.json").display().to_string();

    let mut out = Vec::new();
    cli::watch(&config, Duration::from_millis(10), Some(2), &mut out).await?;
    let text = String::from_utf8(out)?;

    assert_eq!(text.matches("Now: ").count(), 2);
    assert!(text.contains("(catalog: bundled)"));
    assert!(text.contains("(catalog: cache)"));

    Ok(())
}
