//! # Ingredient Extractor
//!
//! Converts unstructured recipe text into structured ingredient records,
//! line by line. This is a best-effort heuristic over pasted or
//! service-extracted text, not a grammar: it may occasionally mis-split
//! amount, unit, and name, but it never fails; malformed lines are silently
//! dropped.
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::ingredient_extractor::extract_ingredients;
//!
//! let ingredients = extract_ingredients("2 cups flour\n1/2 tsp salt");
//! assert_eq!(ingredients[0].name, "flour");
//! assert_eq!(ingredients[1].amount, "0.5");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::quantity_parser::{format_amount, parse_quantity};
use crate::recipe_model::Ingredient;

lazy_static! {
    /// Leading run of digits, fraction slashes, spaces, dots, and hyphens:
    /// the amount token of a line
    static ref AMOUNT_RE: Regex = Regex::new(r"^[0-9\s/.\-]+").unwrap();

    /// Unit vocabulary, matched as whole words anywhere in the line
    static ref UNIT_RE: Regex = Regex::new(
        r"(?i)\b(cup|cups|tbsp|tsp|oz|lb|lbs|g|kg|ml|l|clove|cloves|head|piece|bunch|tablespoon|tablespoons|teaspoon|teaspoons|pound|pounds|ounce|ounces)\b"
    )
    .unwrap();
}

/// Extract structured ingredients from multi-line recipe text.
///
/// Blank lines are skipped; lines whose remaining name is two characters or
/// shorter (section headers, stray numbers) are dropped. Output preserves
/// input line order.
pub fn extract_ingredients(text: &str) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match extract_line(line) {
            Some(ingredient) => ingredients.push(ingredient),
            None => debug!("dropping noise line: {}", line),
        }
    }

    ingredients
}

/// Split one line into amount, unit, and name
fn extract_line(line: &str) -> Option<Ingredient> {
    let amount_end = AMOUNT_RE.find(line).map(|m| m.end()).unwrap_or(0);
    let amount_token = line[..amount_end].trim();
    let amount = if amount_token.is_empty() {
        "1".to_string()
    } else {
        format_amount(parse_quantity(amount_token))
    };

    // The unit search covers the whole line; the matched word is stripped
    // from the name and reported in canonical form ("cups" -> "cup")
    let (unit, name) = match UNIT_RE.find(line) {
        Some(m) if m.start() >= amount_end => {
            let before = &line[amount_end..m.start()];
            let after = &line[m.end()..];
            (canonical_unit(m.as_str()), format!("{}{}", before, after))
        }
        _ => (String::new(), line[amount_end..].to_string()),
    };

    let name = name.trim().to_string();
    if name.chars().count() <= 2 {
        return None;
    }

    Some(Ingredient { amount, unit, name })
}

/// Canonical form of a matched vocabulary word
fn canonical_unit(word: &str) -> String {
    let lowered = word.to_lowercase();
    let canonical = match lowered.as_str() {
        "cup" | "cups" => "cup",
        "tbsp" | "tablespoon" | "tablespoons" => "tbsp",
        "tsp" | "teaspoon" | "teaspoons" => "tsp",
        "oz" | "ounce" | "ounces" => "oz",
        "lb" | "lbs" | "pound" | "pounds" => "lb",
        "clove" | "cloves" => "clove",
        "g" => "g",
        "kg" => "kg",
        "ml" => "ml",
        "l" => "l",
        "head" => "head",
        "piece" => "piece",
        "bunch" => "bunch",
        other => other,
    };
    canonical.to_string()
}
