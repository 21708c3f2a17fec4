use std::env;

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use mealplanner::csv_export::render_grocery_csv;
use mealplanner::db;
use mealplanner::extraction::{recipe_from_extraction, ExtractionClient};
use mealplanner::planner::MealPlanner;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting meal planner");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let database_path = env::var("MEALPLANNER_DB").unwrap_or_else(|_| "mealplanner.db".to_string());

    info!("Opening storage at: {}", database_path);

    let conn = Connection::open(&database_path)
        .with_context(|| format!("Failed to open database at {}", database_path))?;
    db::init_storage_schema(&conn)?;

    let mut planner = MealPlanner::load(&conn)?;

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("import") => {
            let path = args.get(1).context("Usage: mealplanner import <file>")?;
            let endpoint = env::var("EXTRACTION_URL")
                .context("EXTRACTION_URL must be set to import documents")?;

            let document =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
            let client = ExtractionClient::new(&endpoint)?;
            let extracted = client.extract(&document).await?;

            let id = planner.add_or_update_recipe(recipe_from_extraction(path, &extracted));
            planner.save(&conn)?;
            info!("Imported recipe {} from {}", id, path);
        }
        _ => {
            planner.generate_grocery_list();
            planner.save(&conn)?;

            let csv = render_grocery_csv(planner.grocery_list())?;
            print!("{}", csv);
        }
    }

    Ok(())
}
