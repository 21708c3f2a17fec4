//! # Grocery Aggregation Engine
//!
//! Folds a weekly plan and a recipe catalog into a deduplicated,
//! department-sorted grocery list. Each plan entry's ingredients are scaled
//! from the recipe's base serving count to the entry's target count, then
//! accumulated into per-ingredient buckets keyed by lowercased name.
//!
//! The engine is a pure function over its inputs: it performs no I/O, holds
//! no state between runs, and surfaces the `last_used` side effect through
//! the returned recipe copies instead of mutating in place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::department::{classify, display_rank};
use crate::quantity_parser::{format_amount, parse_quantity};
use crate::recipe_model::{GroceryItem, PlanEntry, Recipe};

/// Output of one aggregation pass
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryListResult {
    /// Aggregated items in department display order
    pub grocery_list: Vec<GroceryItem>,
    /// The full recipe catalog, with `last_used` stamped on every recipe the
    /// plan consumed; the caller owns persisting it
    pub updated_recipes: Vec<Recipe>,
}

/// Build a grocery list from the weekly plan.
///
/// Plan entries referencing a missing recipe are skipped. A recipe whose
/// effective base serving count is zero still gets its `last_used` stamp but
/// contributes no ingredients, so no division by zero can reach the totals.
pub fn build_grocery_list(
    plan: &[PlanEntry],
    recipes: &[Recipe],
    pantry: &[String],
    now: DateTime<Utc>,
) -> GroceryListResult {
    let mut updated_recipes = recipes.to_vec();
    let mut buckets: Vec<GroceryItem> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for entry in plan {
        let Some(recipe) = recipes.iter().find(|r| r.id == entry.recipe_id) else {
            debug!(
                "plan entry {} references missing recipe {}, skipping",
                entry.id, entry.recipe_id
            );
            continue;
        };

        if let Some(updated) = updated_recipes.iter_mut().find(|r| r.id == recipe.id) {
            updated.last_used = Some(now);
        }

        let base_servings = recipe.effective_base_servings();
        if base_servings == 0 {
            debug!(
                "recipe '{}' has no usable serving count, skipping its ingredients",
                recipe.name
            );
            continue;
        }
        let multiplier = entry.servings as f64 / base_servings as f64;

        for ingredient in recipe.scaling_ingredients() {
            let key = ingredient.name.to_lowercase();
            let index = *index_by_key.entry(key).or_insert_with(|| {
                // First occurrence establishes name, unit, and department
                buckets.push(GroceryItem {
                    name: ingredient.name.clone(),
                    unit: ingredient.unit.clone(),
                    total_amount: 0.0,
                    display_amount: String::new(),
                    department: classify(&ingredient.name),
                    in_pantry: false,
                });
                buckets.len() - 1
            });
            buckets[index].total_amount += parse_quantity(&ingredient.amount) * multiplier;
        }
    }

    for item in &mut buckets {
        item.display_amount = consolidate_amount(item.total_amount, &item.unit, &item.name);
        item.in_pantry = pantry
            .iter()
            .any(|p| p.to_lowercase() == item.name.to_lowercase());
    }

    buckets.sort_by_key(|item| display_rank(item.department));

    info!(
        "aggregated {} grocery items from {} plan entries",
        buckets.len(),
        plan.len()
    );

    GroceryListResult {
        grocery_list: buckets,
        updated_recipes,
    }
}

/// Render a numeric total as a shopping-friendly amount.
///
/// Totals round up to the nearest quarter. Garlic cloves convert to heads at
/// ten cloves per head; cup quantities above one pluralize. An empty unit
/// yields a bare number.
pub fn consolidate_amount(total: f64, unit: &str, name: &str) -> String {
    let rounded = round_up_to_quarter(total);
    let unit_lower = unit.to_lowercase();

    if unit_lower.contains("clove") && name.to_lowercase().contains("garlic") {
        let heads = (rounded / 10.0).ceil() as i64;
        return if heads == 1 {
            "1 head".to_string()
        } else {
            format!("{} heads", heads)
        };
    }

    if unit_lower.contains("cup") && rounded > 1.0 {
        return format!("{} cups", format_amount(rounded));
    }

    if unit.is_empty() {
        format_amount(rounded)
    } else {
        format!("{} {}", format_amount(rounded), unit)
    }
}

fn round_up_to_quarter(amount: f64) -> f64 {
    (amount * 4.0).ceil() / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::department::Department;
    use crate::recipe_model::Ingredient;

    fn recipe(id: i64, servings: u32, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe::new(id, &format!("Recipe {}", id), "Other", servings).with_ingredients(ingredients)
    }

    fn entry(id: i64, recipe_id: i64, day: u32, servings: u32) -> PlanEntry {
        PlanEntry {
            id,
            recipe_id,
            day,
            servings,
        }
    }

    #[test]
    fn test_scaling_by_target_servings() {
        let recipes = vec![recipe(
            1,
            4,
            vec![Ingredient::new("2", "cup", "rice")],
        )];
        let plan = vec![entry(10, 1, 0, 8)];

        let result = build_grocery_list(&plan, &recipes, &[], Utc::now());

        assert_eq!(result.grocery_list.len(), 1);
        assert_eq!(result.grocery_list[0].total_amount, 4.0);
        assert_eq!(result.grocery_list[0].display_amount, "4 cups");
    }

    #[test]
    fn test_case_insensitive_merge_keeps_first_seen_name_and_unit() {
        let recipes = vec![
            recipe(1, 4, vec![Ingredient::new("1", "cup", "Cheddar Cheese")]),
            recipe(2, 4, vec![Ingredient::new("8", "oz", "cheddar cheese")]),
        ];
        let plan = vec![entry(10, 1, 0, 4), entry(11, 2, 1, 4)];

        let result = build_grocery_list(&plan, &recipes, &[], Utc::now());

        assert_eq!(result.grocery_list.len(), 1);
        let item = &result.grocery_list[0];
        assert_eq!(item.name, "Cheddar Cheese");
        assert_eq!(item.unit, "cup");
        // Units are not converted; totals just add
        assert_eq!(item.total_amount, 9.0);
    }

    #[test]
    fn test_missing_recipe_is_skipped() {
        let recipes = vec![recipe(1, 4, vec![Ingredient::new("1", "", "apple")])];
        let plan = vec![entry(10, 99, 0, 4), entry(11, 1, 1, 4)];

        let result = build_grocery_list(&plan, &recipes, &[], Utc::now());
        assert_eq!(result.grocery_list.len(), 1);
        assert_eq!(result.grocery_list[0].name, "apple");
    }

    #[test]
    fn test_last_used_stamped_only_on_consumed_recipes() {
        let recipes = vec![
            recipe(1, 4, vec![Ingredient::new("1", "", "apple")]),
            recipe(2, 4, vec![Ingredient::new("1", "", "pear")]),
        ];
        let plan = vec![entry(10, 1, 0, 4)];
        let now = Utc::now();

        let result = build_grocery_list(&plan, &recipes, &[], now);

        assert_eq!(result.updated_recipes[0].last_used, Some(now));
        assert_eq!(result.updated_recipes[1].last_used, None);
        // Inputs are untouched
        assert!(recipes[0].last_used.is_none());
    }

    #[test]
    fn test_zero_base_servings_skips_contributions_but_stamps() {
        let mut zero = recipe(1, 0, vec![Ingredient::new("2", "cup", "rice")]);
        zero.base_servings = 0;
        let plan = vec![entry(10, 1, 0, 4)];
        let now = Utc::now();

        let result = build_grocery_list(&plan, &[zero], &[], now);

        assert!(result.grocery_list.is_empty());
        assert_eq!(result.updated_recipes[0].last_used, Some(now));
    }

    #[test]
    fn test_garlic_cloves_consolidate_to_heads() {
        // 2 cloves at base 4 servings, planned for 8 -> 4 cloves -> 1 head
        let recipes = vec![recipe(
            1,
            4,
            vec![Ingredient::new("2", "clove", "garlic")],
        )];
        let plan = vec![entry(10, 1, 0, 8)];

        let result = build_grocery_list(&plan, &recipes, &[], Utc::now());
        assert_eq!(result.grocery_list[0].display_amount, "1 head");
    }

    #[test]
    fn test_pantry_membership_is_case_insensitive() {
        let recipes = vec![recipe(
            1,
            4,
            vec![
                Ingredient::new("2", "cup", "Flour"),
                Ingredient::new("1", "tsp", "salt"),
            ],
        )];
        let plan = vec![entry(10, 1, 0, 4)];
        let pantry = vec!["flour".to_string()];

        let result = build_grocery_list(&plan, &recipes, &pantry, Utc::now());

        let flour = result.grocery_list.iter().find(|i| i.name == "Flour").unwrap();
        let salt = result.grocery_list.iter().find(|i| i.name == "salt").unwrap();
        assert!(flour.in_pantry);
        assert!(!salt.in_pantry);
    }

    #[test]
    fn test_sorted_by_display_order() {
        let recipes = vec![recipe(
            1,
            4,
            vec![
                Ingredient::new("1", "", "mystery item"),
                Ingredient::new("1", "tsp", "oregano"),
                Ingredient::new("1", "cup", "flour"),
                Ingredient::new("1", "lb", "chicken"),
                Ingredient::new("2", "", "tomato"),
            ],
        )];
        let plan = vec![entry(10, 1, 0, 4)];

        let result = build_grocery_list(&plan, &recipes, &[], Utc::now());
        let departments: Vec<Department> = result
            .grocery_list
            .iter()
            .map(|item| item.department)
            .collect();

        assert_eq!(
            departments,
            vec![
                Department::Produce,
                Department::MeatFish,
                Department::Pantry,
                Department::Spices,
                Department::Other,
            ]
        );
    }

    #[test]
    fn test_consolidate_rounds_up_to_quarter() {
        assert_eq!(consolidate_amount(1.1, "cup", "flour"), "1.25 cups");
        assert_eq!(consolidate_amount(0.1, "tsp", "salt"), "0.25 tsp");
        assert_eq!(consolidate_amount(2.0, "", "apple"), "2");
    }

    #[test]
    fn test_consolidate_cup_pluralization_threshold() {
        // Exactly one cup stays singular; anything above pluralizes
        assert_eq!(consolidate_amount(1.0, "cup", "flour"), "1 cup");
        assert_eq!(consolidate_amount(1.25, "cup", "flour"), "1.25 cups");
    }

    #[test]
    fn test_consolidate_garlic_heads_pluralize() {
        assert_eq!(consolidate_amount(4.0, "clove", "garlic"), "1 head");
        assert_eq!(consolidate_amount(12.0, "cloves", "garlic"), "2 heads");
        // Cloves of anything else stay cloves
        assert_eq!(consolidate_amount(4.0, "clove", "shallot"), "4 clove");
    }
}
