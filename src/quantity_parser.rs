//! # Quantity Parser
//!
//! This module converts a single free-text quantity token into a decimal
//! number. It handles plain decimals, text fractions, mixed numbers, and
//! unicode vulgar-fraction glyphs.
//!
//! ## Features
//!
//! - Parse fractions (1/2, 2 1/4, etc.) and mixed numbers
//! - Recognize unicode fraction glyphs (½, ⅓, ⅞, ...), standalone or attached
//!   to a whole number ("2½")
//! - Degrade to `0` for anything unparseable; the parser never fails
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::quantity_parser::parse_quantity;
//!
//! assert_eq!(parse_quantity("1 1/2"), 1.5);
//! assert_eq!(parse_quantity("¾"), 0.75);
//! assert_eq!(parse_quantity("garnish"), 0.0);
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for the supported quantity forms
static QUANTITY_PATTERNS: LazyLock<QuantityPatterns> = LazyLock::new(QuantityPatterns::new);

/// Unicode vulgar-fraction glyphs and their decimal values
const UNICODE_FRACTIONS: [(char, f64); 18] = [
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅐', 0.142857),
    ('⅑', 0.111111),
    ('⅒', 0.1),
    ('⅓', 0.333333),
    ('⅔', 0.666667),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 0.166667),
    ('⅚', 0.833333),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Compiled regex patterns for parsing
struct QuantityPatterns {
    /// Matches mixed unicode fractions: "2½", "11⅓"
    mixed_unicode: Regex,
    /// Matches mixed text fractions: "1 1/2", "2 1 / 4"
    mixed_text: Regex,
    /// Matches simple text fractions: "1/2", "3 / 4"
    simple_fraction: Regex,
    /// Matches the spaced whole+decimal form left by glyph substitution: "2 0.5"
    spaced: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            mixed_unicode: Regex::new(r"^(\d+)([¼½¾⅐⅑⅒⅓⅔⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$").unwrap(),
            mixed_text: Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)$").unwrap(),
            simple_fraction: Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap(),
            spaced: Regex::new(r"^(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)$").unwrap(),
        }
    }
}

/// Parse a quantity token into a decimal number.
///
/// Forms are tried in a fixed precedence order; a mixed unicode fraction like
/// "2½" must win before generic glyph substitution would split it apart.
/// Unparseable input yields `0.0`, and fractions over a zero denominator
/// contribute `0` rather than NaN or infinity.
pub fn parse_quantity(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // Mixed number with a unicode fraction glyph, e.g. "2½"
    if let Some(captures) = QUANTITY_PATTERNS.mixed_unicode.captures(trimmed) {
        let whole: f64 = captures[1].parse().unwrap_or(0.0);
        let fraction = captures[2]
            .chars()
            .next()
            .and_then(fraction_value)
            .unwrap_or(0.0);
        return whole + fraction;
    }

    // A standalone glyph is its decimal value
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(value) = fraction_value(c) {
            return value;
        }
    }

    // Substitute any remaining glyphs with space-prefixed decimal literals,
    // so "2 ½" becomes "2  0.5" and falls into the spaced form below
    let mut cleaned = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match fraction_value(c) {
            Some(value) => {
                cleaned.push(' ');
                cleaned.push_str(&value.to_string());
            }
            None => cleaned.push(c),
        }
    }
    let cleaned = cleaned.trim();

    // Mixed text fraction, e.g. "1 1/2"
    if let Some(captures) = QUANTITY_PATTERNS.mixed_text.captures(cleaned) {
        let whole: f64 = captures[1].parse().unwrap_or(0.0);
        let numerator: f64 = captures[2].parse().unwrap_or(0.0);
        let denominator: f64 = captures[3].parse().unwrap_or(0.0);
        return whole + safe_divide(numerator, denominator);
    }

    // Simple text fraction, e.g. "1/2"
    if let Some(captures) = QUANTITY_PATTERNS.simple_fraction.captures(cleaned) {
        let numerator: f64 = captures[1].parse().unwrap_or(0.0);
        let denominator: f64 = captures[2].parse().unwrap_or(0.0);
        return safe_divide(numerator, denominator);
    }

    // Spaced whole+decimal form, e.g. "2 0.5"
    if let Some(captures) = QUANTITY_PATTERNS.spaced.captures(cleaned) {
        let whole: f64 = captures[1].parse().unwrap_or(0.0);
        let fraction: f64 = captures[2].parse().unwrap_or(0.0);
        return whole + fraction;
    }

    // Plain decimal or integer literal
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Render a parsed amount back to a string, dropping the decimal point for
/// whole numbers ("2" rather than "2.0").
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Look up the decimal value of a unicode fraction glyph
fn fraction_value(c: char) -> Option<f64> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}

fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
