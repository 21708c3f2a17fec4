//! # Meal Planner
//!
//! Normalizes free-text ingredient quantities, extracts structured
//! ingredients from recipe text, scales a weekly plan by target servings,
//! and aggregates the result into a department-sorted grocery list.

pub mod csv_export;
pub mod db;
pub mod department;
pub mod extraction;
pub mod grocery_aggregator;
pub mod ingredient_extractor;
pub mod planner;
pub mod quantity_parser;
pub mod recipe_model;
