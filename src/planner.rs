//! # Meal Planner Controller
//!
//! Owns the application state (recipe library, weekly plan, pantry, and the
//! last generated grocery list) and exposes the operations the surrounding
//! application performs on it. All numeric/text logic lives in the leaf
//! modules; this controller only moves snapshots around and keeps the
//! collections consistent, e.g. deleting a recipe drops its plan entries.

use anyhow::Result;
use chrono::Utc;
use log::info;
use rusqlite::Connection;

use crate::db;
use crate::department::{display_rank, Department};
use crate::grocery_aggregator::build_grocery_list;
use crate::recipe_model::{GroceryItem, PlanEntry, Recipe, CUISINE_TYPES};

/// Which recipe field a library search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBy {
    Name,
    Cuisine,
    Ingredients,
}

/// Direction for reordering plan entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Application state holder
#[derive(Debug, Default, Clone)]
pub struct MealPlanner {
    recipes: Vec<Recipe>,
    weekly_plan: Vec<PlanEntry>,
    pantry_items: Vec<String>,
    grocery_list: Vec<GroceryItem>,
}

impl MealPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load persisted state; the grocery list always starts empty and is
    /// regenerated on demand
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Self {
            recipes: db::load_recipes(conn)?,
            weekly_plan: db::load_weekly_plan(conn)?,
            pantry_items: db::load_pantry_items(conn)?,
            grocery_list: Vec::new(),
        })
    }

    /// Persist the three durable collections
    pub fn save(&self, conn: &Connection) -> Result<()> {
        db::save_recipes(conn, &self.recipes)?;
        db::save_weekly_plan(conn, &self.weekly_plan)?;
        db::save_pantry_items(conn, &self.pantry_items)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn weekly_plan(&self) -> &[PlanEntry] {
        &self.weekly_plan
    }

    pub fn pantry_items(&self) -> &[String] {
        &self.pantry_items
    }

    pub fn grocery_list(&self) -> &[GroceryItem] {
        &self.grocery_list
    }

    /// Next free identifier, above everything currently in use
    fn next_id(&self) -> i64 {
        let max_recipe = self.recipes.iter().map(|r| r.id).max().unwrap_or(0);
        let max_plan = self.weekly_plan.iter().map(|p| p.id).max().unwrap_or(0);
        max_recipe.max(max_plan) + 1
    }

    /// Insert a new recipe (id 0 means "allocate one") or replace an existing
    /// recipe wholesale. The base scaling pair is filled from the display pair
    /// when unset. Returns the stored id.
    pub fn add_or_update_recipe(&mut self, mut recipe: Recipe) -> i64 {
        if recipe.base_servings == 0 {
            recipe.base_servings = recipe.servings;
        }
        if recipe.base_ingredients.is_empty() {
            recipe.base_ingredients = recipe.ingredients.clone();
        }

        if let Some(existing) = self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            let id = recipe.id;
            *existing = recipe;
            info!("Updated recipe {}", id);
            id
        } else {
            if recipe.id == 0 {
                recipe.id = self.next_id();
            }
            recipe.last_used = None;
            let id = recipe.id;
            info!("Added recipe {} '{}'", id, recipe.name);
            self.recipes.push(recipe);
            id
        }
    }

    /// Delete a recipe and every plan entry that references it
    pub fn delete_recipe(&mut self, id: i64) {
        self.recipes.retain(|r| r.id != id);
        self.weekly_plan.retain(|p| p.recipe_id != id);
    }

    /// Schedule a recipe at the end of the plan; target servings seed from
    /// the recipe's base count. Returns the new entry id, or None for an
    /// unknown recipe.
    pub fn add_to_plan(&mut self, recipe_id: i64) -> Option<i64> {
        let recipe = self.recipes.iter().find(|r| r.id == recipe_id)?;
        let entry = PlanEntry {
            id: self.next_id(),
            recipe_id,
            day: self.weekly_plan.len() as u32,
            servings: recipe.effective_base_servings(),
        };
        let id = entry.id;
        self.weekly_plan.push(entry);
        Some(id)
    }

    pub fn remove_from_plan(&mut self, entry_id: i64) {
        self.weekly_plan.retain(|p| p.id != entry_id);
    }

    pub fn update_plan_servings(&mut self, entry_id: i64, servings: u32) {
        if let Some(entry) = self.weekly_plan.iter_mut().find(|p| p.id == entry_id) {
            entry.servings = servings;
        }
    }

    /// Move a plan entry one slot up or down; moves past either end are no-ops
    pub fn move_plan_entry(&mut self, entry_id: i64, direction: MoveDirection) {
        let Some(index) = self.weekly_plan.iter().position(|p| p.id == entry_id) else {
            return;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.weekly_plan.len() => index + 1,
            _ => return,
        };
        self.weekly_plan.swap(index, target);
    }

    /// Run the aggregation engine over the current plan, adopt its grocery
    /// list, and fold the `last_used` stamps back into the library
    pub fn generate_grocery_list(&mut self) {
        let result = build_grocery_list(
            &self.weekly_plan,
            &self.recipes,
            &self.pantry_items,
            Utc::now(),
        );
        self.recipes = result.updated_recipes;
        self.grocery_list = result.grocery_list;
    }

    /// Toggle pantry membership for an item name and flip the pantry flag on
    /// matching grocery items in place
    pub fn toggle_pantry_item(&mut self, name: &str) {
        if let Some(position) = self.pantry_items.iter().position(|p| p == name) {
            self.pantry_items.remove(position);
        } else {
            self.pantry_items.push(name.to_string());
        }

        for item in self.grocery_list.iter_mut().filter(|item| item.name == name) {
            item.in_pantry = !item.in_pantry;
        }
    }

    /// Add a hand-entered grocery item; it bypasses aggregation and only
    /// takes part in the department sort and pantry/removal handling.
    /// Blank names are rejected.
    pub fn add_custom_grocery_item(
        &mut self,
        name: &str,
        display_amount: &str,
        department: Department,
    ) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.grocery_list
            .push(GroceryItem::custom(name, display_amount, department));
        self.grocery_list
            .sort_by_key(|item| display_rank(item.department));
        true
    }

    pub fn remove_grocery_item(&mut self, name: &str) {
        self.grocery_list.retain(|item| item.name != name);
    }

    /// Case-insensitive substring search over the library; a blank term
    /// matches everything
    pub fn search_recipes(&self, term: &str, by: SearchBy) -> Vec<&Recipe> {
        let term = term.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|recipe| {
                if term.is_empty() {
                    return true;
                }
                match by {
                    SearchBy::Name => recipe.name.to_lowercase().contains(&term),
                    SearchBy::Cuisine => recipe.cuisine.to_lowercase().contains(&term),
                    SearchBy::Ingredients => recipe
                        .ingredients
                        .iter()
                        .any(|ing| ing.name.to_lowercase().contains(&term)),
                }
            })
            .collect()
    }

    /// Recipes grouped by the known cuisine list, skipping empty groups
    pub fn recipes_by_cuisine(&self) -> Vec<(&'static str, Vec<&Recipe>)> {
        CUISINE_TYPES
            .iter()
            .map(|cuisine| {
                (
                    *cuisine,
                    self.recipes
                        .iter()
                        .filter(|r| r.cuisine == *cuisine)
                        .collect::<Vec<_>>(),
                )
            })
            .filter(|(_, recipes)| !recipes.is_empty())
            .collect()
    }
}
