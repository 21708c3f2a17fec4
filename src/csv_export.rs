//! # Grocery List CSV Rendering
//!
//! Renders the grocery list as CSV data for external consumers: header
//! `Item,Amount,Department`, one row per item still to buy, every field
//! quoted. Writing the result anywhere is the caller's business.

use anyhow::{anyhow, Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::recipe_model::GroceryItem;

/// Render the grocery list as CSV, excluding items already in the pantry.
/// Rows keep the list's order.
pub fn render_grocery_csv(items: &[GroceryItem]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(["Item", "Amount", "Department"])
        .context("Failed to write CSV header")?;

    for item in items.iter().filter(|item| !item.in_pantry) {
        writer
            .write_record([
                item.name.as_str(),
                item.display_amount.as_str(),
                item.department.as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for '{}'", item.name))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("Failed to flush CSV output: {}", err))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
