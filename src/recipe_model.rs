//! # Recipe and Grocery Data Model
//!
//! This module defines the data structures shared across the planner:
//! recipes with their scaling reference, weekly plan entries, grocery items,
//! and the raw ingredient records the extractor produces.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: a raw textual quantity, unit, and name, as entered or
//!   extracted
//! - **Recipe**: display ingredients/servings plus an immutable *base* pair
//!   used as the scaling reference
//! - **PlanEntry**: one scheduled recipe occurrence with its own target
//!   serving count
//! - **GroceryItem**: one aggregated line of the grocery list
//!
//! All types round-trip through JSON with the field names the persisted blobs
//! use (`baseServings`, `lastUsed`, `recipeId`, ...); absent optionals are
//! omitted rather than written as null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::department::Department;

/// The cuisines the recipe library groups by
pub const CUISINE_TYPES: [&str; 8] = [
    "Italian",
    "Mexican",
    "Asian",
    "American",
    "Mediterranean",
    "Indian",
    "French",
    "Other",
];

/// A raw ingredient record: textual amount, unit word, and name.
///
/// The amount is kept as entered (it may be a fraction, a glyph, or nothing
/// numeric at all); the quantity parser folds it to a number at aggregation
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub name: String,
}

impl Ingredient {
    pub fn new(amount: &str, unit: &str, name: &str) -> Self {
        Self {
            amount: amount.to_string(),
            unit: unit.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for part in [&self.amount, &self.unit, &self.name] {
            if part.is_empty() {
                continue;
            }
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "{}", part)?;
            wrote = true;
        }
        Ok(())
    }
}

/// A recipe in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub servings: u32,
    /// Serving count the base ingredients were written for; the scaling
    /// reference for aggregation
    #[serde(default)]
    pub base_servings: u32,
    pub ingredients: Vec<Ingredient>,
    /// Ingredient quantities as originally entered or extracted; aggregation
    /// always reads from these, never from the display pair
    #[serde(default)]
    pub base_ingredients: Vec<Ingredient>,
    /// When the recipe last fed a grocery-list generation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Create a recipe whose base pair mirrors the display pair
    pub fn new(id: i64, name: &str, cuisine: &str, servings: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            servings,
            base_servings: servings,
            ingredients: Vec::new(),
            base_ingredients: Vec::new(),
            last_used: None,
        }
    }

    /// Set both the display and base ingredient lists
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.base_ingredients = ingredients.clone();
        self.ingredients = ingredients;
        self
    }

    /// The serving count scaling is computed against, falling back to the
    /// display count when the base was never recorded. May still be zero.
    pub fn effective_base_servings(&self) -> u32 {
        if self.base_servings > 0 {
            self.base_servings
        } else {
            self.servings
        }
    }

    /// The ingredient list scaling reads from, falling back to the display
    /// list when the base was never recorded
    pub fn scaling_ingredients(&self) -> &[Ingredient] {
        if self.base_ingredients.is_empty() {
            &self.ingredients
        } else {
            &self.base_ingredients
        }
    }
}

/// One scheduled recipe occurrence in the weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub id: i64,
    /// Weak reference to a recipe; the planner deletes dependent entries when
    /// the recipe goes away
    pub recipe_id: i64,
    pub day: u32,
    pub servings: u32,
}

/// One aggregated line of the grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub name: String,
    /// Unit of the first-seen ingredient with this name; later contributions
    /// are folded in without unit conversion
    pub unit: String,
    pub total_amount: f64,
    /// Shopping-friendly rendering, recomputed whenever the total changes
    pub display_amount: String,
    pub department: Department,
    pub in_pantry: bool,
}

impl GroceryItem {
    /// A hand-entered item that bypasses aggregation: it carries the caller's
    /// display amount directly and never accumulates a numeric total.
    pub fn custom(name: &str, display_amount: &str, department: Department) -> Self {
        let display_amount = if display_amount.trim().is_empty() {
            "1".to_string()
        } else {
            display_amount.to_string()
        };
        Self {
            name: name.to_string(),
            unit: String::new(),
            total_amount: 0.0,
            display_amount,
            department,
            in_pantry: false,
        }
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.display_amount)
    }
}
