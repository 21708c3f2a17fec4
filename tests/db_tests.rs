#[cfg(test)]
mod tests {
    use anyhow::Result;
    use mealplanner::db::*;
    use mealplanner::recipe_model::{Ingredient, PlanEntry, Recipe};
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn setup_test_db() -> Result<(TempDir, Connection)> {
        let dir = TempDir::new()?;
        let conn = Connection::open(dir.path().join("planner.db"))?;
        init_storage_schema(&conn)?;
        Ok((dir, conn))
    }

    #[test]
    fn test_blob_write_read_and_overwrite() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        assert_eq!(read_blob(&conn, "missing")?, None);

        write_blob(&conn, "greeting", "\"hello\"")?;
        assert_eq!(read_blob(&conn, "greeting")?, Some("\"hello\"".to_string()));

        write_blob(&conn, "greeting", "\"goodbye\"")?;
        assert_eq!(read_blob(&conn, "greeting")?, Some("\"goodbye\"".to_string()));

        Ok(())
    }

    #[test]
    fn test_recipes_round_trip_losslessly() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        let recipes = vec![
            Recipe::new(1, "Lasagna", "Italian", 4).with_ingredients(vec![
                Ingredient::new("1 1/2", "lb", "ground beef"),
                Ingredient::new("½", "cup", "parmesan"),
            ]),
            Recipe::new(2, "Tacos", "Mexican", 2),
        ];
        save_recipes(&conn, &recipes)?;

        let loaded = load_recipes(&conn)?;
        assert_eq!(loaded, recipes);
        // Raw textual amounts survive storage untouched
        assert_eq!(loaded[0].base_ingredients[0].amount, "1 1/2");
        assert_eq!(loaded[0].base_ingredients[1].amount, "½");

        Ok(())
    }

    #[test]
    fn test_each_collection_lives_under_its_own_key() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        save_recipes(&conn, &[Recipe::new(1, "Soup", "Other", 4)])?;
        save_weekly_plan(
            &conn,
            &[PlanEntry {
                id: 10,
                recipe_id: 1,
                day: 0,
                servings: 4,
            }],
        )?;
        save_pantry_items(&conn, &["salt".to_string(), "olive oil".to_string()])?;

        assert!(read_blob(&conn, RECIPES_KEY)?.is_some());
        assert!(read_blob(&conn, WEEKLY_PLAN_KEY)?.is_some());
        assert!(read_blob(&conn, PANTRY_ITEMS_KEY)?.is_some());

        let plan = load_weekly_plan(&conn)?;
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].recipe_id, 1);

        let pantry = load_pantry_items(&conn)?;
        assert_eq!(pantry, vec!["salt".to_string(), "olive oil".to_string()]);

        Ok(())
    }

    #[test]
    fn test_missing_blobs_load_as_empty_collections() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        assert!(load_recipes(&conn)?.is_empty());
        assert!(load_weekly_plan(&conn)?.is_empty());
        assert!(load_pantry_items(&conn)?.is_empty());

        Ok(())
    }

    #[test]
    fn test_last_used_survives_a_round_trip() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        let mut recipe = Recipe::new(1, "Curry", "Indian", 4);
        recipe.last_used = Some(chrono::Utc::now());
        save_recipes(&conn, &[recipe.clone()])?;

        let loaded = load_recipes(&conn)?;
        assert_eq!(loaded[0].last_used, recipe.last_used);

        Ok(())
    }

    #[test]
    fn test_schema_init_is_repeatable() -> Result<()> {
        let (_dir, conn) = setup_test_db()?;

        write_blob(&conn, RECIPES_KEY, "[]")?;
        // A second init must not clobber stored state
        init_storage_schema(&conn)?;
        assert_eq!(read_blob(&conn, RECIPES_KEY)?, Some("[]".to_string()));

        Ok(())
    }
}
