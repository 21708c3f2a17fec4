//! # Department Classification
//!
//! Maps ingredient names to grocery-store departments by keyword matching,
//! and defines the department order used when rendering the final list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grocery-store section for a grocery item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Produce,
    #[serde(rename = "Meat/Fish")]
    MeatFish,
    Dairy,
    Spices,
    Pantry,
    Other,
}

/// Keyword sets in match-precedence order. Produce is tested before Spices,
/// so any "pepper" classifies as Produce.
const MATCH_ORDER: [(Department, &[&str]); 5] = [
    (
        Department::Produce,
        &[
            "tomato", "onion", "garlic", "pepper", "carrot", "celery", "spinach", "potato",
            "basil",
        ],
    ),
    (
        Department::MeatFish,
        &["chicken", "beef", "pork", "fish", "sausage"],
    ),
    (
        Department::Dairy,
        &[
            "milk", "cheese", "butter", "cream", "yogurt", "egg", "ricotta", "parmesan",
        ],
    ),
    (
        Department::Spices,
        &["salt", "pepper", "oregano", "nutmeg", "spice"],
    ),
    (
        Department::Pantry,
        &[
            "flour", "sugar", "oil", "sauce", "broth", "marinara", "noodle", "paste",
        ],
    ),
];

/// Department order for the rendered grocery list. This is a different
/// ordering than [`MATCH_ORDER`] above; the two are kept as separate tables.
pub const DISPLAY_ORDER: [Department; 6] = [
    Department::Produce,
    Department::MeatFish,
    Department::Dairy,
    Department::Pantry,
    Department::Spices,
    Department::Other,
];

/// Classify an ingredient name into a department.
///
/// Matching is a case-insensitive substring test against each keyword set in
/// [`MATCH_ORDER`]; the first set with a hit wins. Names matching nothing go
/// to [`Department::Other`].
pub fn classify(name: &str) -> Department {
    let lower = name.to_lowercase();
    for (department, keywords) in MATCH_ORDER.iter() {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *department;
        }
    }
    Department::Other
}

/// Sort rank of a department in the rendered grocery list
pub fn display_rank(department: Department) -> usize {
    DISPLAY_ORDER
        .iter()
        .position(|d| *d == department)
        .unwrap_or(DISPLAY_ORDER.len())
}

impl Department {
    /// Human-readable department label, as persisted and exported
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Produce => "Produce",
            Department::MeatFish => "Meat/Fish",
            Department::Dairy => "Dairy",
            Department::Spices => "Spices",
            Department::Pantry => "Pantry",
            Department::Other => "Other",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
