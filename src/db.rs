//! # Key-Value Blob Storage
//!
//! Recipes, the weekly plan, and the pantry are each persisted as one
//! independent JSON-encoded blob under a stable logical key. The store is a
//! single SQLite table; collection-level integrity (deleting a recipe's plan
//! entries with it) belongs to the planner, not to this layer.

use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use crate::recipe_model::{PlanEntry, Recipe};

/// Logical key for the recipe catalog blob
pub const RECIPES_KEY: &str = "recipes";
/// Logical key for the weekly plan blob
pub const WEEKLY_PLAN_KEY: &str = "weeklyPlan";
/// Logical key for the pantry blob
pub const PANTRY_ITEMS_KEY: &str = "pantryItems";

/// Initialize the storage schema
pub fn init_storage_schema(conn: &Connection) -> Result<()> {
    info!("Initializing storage schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create app_state table")?;

    info!("Storage schema initialized successfully");
    Ok(())
}

/// Write a JSON blob under a logical key, replacing any previous value
pub fn write_blob(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )
    .with_context(|| format!("Failed to write blob under key '{}'", key))?;
    Ok(())
}

/// Read the JSON blob stored under a logical key
pub fn read_blob(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("Failed to read blob under key '{}'", key))
}

/// Persist the recipe catalog
pub fn save_recipes(conn: &Connection, recipes: &[Recipe]) -> Result<()> {
    info!("Saving {} recipes", recipes.len());
    let json = serde_json::to_string(recipes).context("Failed to encode recipes")?;
    write_blob(conn, RECIPES_KEY, &json)
}

/// Load the recipe catalog; a missing blob is an empty catalog
pub fn load_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
    match read_blob(conn, RECIPES_KEY)? {
        Some(json) => serde_json::from_str(&json).context("Failed to decode recipes blob"),
        None => Ok(Vec::new()),
    }
}

/// Persist the weekly plan
pub fn save_weekly_plan(conn: &Connection, plan: &[PlanEntry]) -> Result<()> {
    info!("Saving weekly plan with {} entries", plan.len());
    let json = serde_json::to_string(plan).context("Failed to encode weekly plan")?;
    write_blob(conn, WEEKLY_PLAN_KEY, &json)
}

/// Load the weekly plan; a missing blob is an empty plan
pub fn load_weekly_plan(conn: &Connection) -> Result<Vec<PlanEntry>> {
    match read_blob(conn, WEEKLY_PLAN_KEY)? {
        Some(json) => serde_json::from_str(&json).context("Failed to decode weekly plan blob"),
        None => Ok(Vec::new()),
    }
}

/// Persist the pantry item names
pub fn save_pantry_items(conn: &Connection, items: &[String]) -> Result<()> {
    info!("Saving {} pantry items", items.len());
    let json = serde_json::to_string(items).context("Failed to encode pantry items")?;
    write_blob(conn, PANTRY_ITEMS_KEY, &json)
}

/// Load the pantry item names; a missing blob is an empty pantry
pub fn load_pantry_items(conn: &Connection) -> Result<Vec<String>> {
    match read_blob(conn, PANTRY_ITEMS_KEY)? {
        Some(json) => serde_json::from_str(&json).context("Failed to decode pantry items blob"),
        None => Ok(Vec::new()),
    }
}
