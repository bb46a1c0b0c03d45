//! # Recipe Repository
//!
//! Recipe lines (resep), keyed by `(menu_id, ingredient_id)`.
//!
//! Neither side of the key is checked against the other tables: a line may
//! name an ingredient that was deleted or never existed.

use cogs_core::RecipeLine;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const UPSERT_LINE: &str = r#"
    INSERT INTO recipe_lines (menu_id, ingredient_id, quantity) VALUES (?1, ?2, ?3)
    ON CONFLICT (menu_id, ingredient_id) DO UPDATE SET quantity = excluded.quantity
"#;

/// Repository for recipe line database operations.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Creates a new RecipeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecipeRepository { pool }
    }

    /// Lists all recipe lines, grouped by menu.
    pub async fn list(&self) -> DbResult<Vec<RecipeLine>> {
        let lines = sqlx::query_as::<_, RecipeLine>(
            "SELECT menu_id, ingredient_id, quantity FROM recipe_lines ORDER BY menu_id, ingredient_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists the lines of one menu.
    pub async fn for_menu(&self, menu_id: &str) -> DbResult<Vec<RecipeLine>> {
        let lines = sqlx::query_as::<_, RecipeLine>(
            "SELECT menu_id, ingredient_id, quantity FROM recipe_lines WHERE menu_id = ?1 ORDER BY ingredient_id",
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Inserts a line, or sets the quantity of the existing line with the
    /// same `(menu_id, ingredient_id)`.
    pub async fn upsert(&self, line: &RecipeLine) -> DbResult<()> {
        line.validate()?;

        debug!(menu_id = %line.menu_id, ingredient_id = %line.ingredient_id, "Upserting recipe line");

        sqlx::query(UPSERT_LINE)
            .bind(&line.menu_id)
            .bind(&line.ingredient_id)
            .bind(line.quantity)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Removes one line.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - The menu has no line for this ingredient
    pub async fn delete(&self, menu_id: &str, ingredient_id: &str) -> DbResult<()> {
        debug!(menu_id = %menu_id, ingredient_id = %ingredient_id, "Deleting recipe line");

        let result =
            sqlx::query("DELETE FROM recipe_lines WHERE menu_id = ?1 AND ingredient_id = ?2")
                .bind(menu_id)
                .bind(ingredient_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Recipe line",
                format!("{menu_id}/{ingredient_id}"),
            ));
        }

        Ok(())
    }

    /// Replaces every recipe line with `lines`, in one transaction.
    ///
    /// All lines are checked before anything is written. A repeated key
    /// keeps its last quantity, so the returned count of stored lines can
    /// be lower than `lines.len()`.
    pub async fn replace_all(&self, lines: &[RecipeLine]) -> DbResult<u64> {
        for line in lines {
            line.validate()?;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM recipe_lines").execute(&mut *tx).await?;
        for line in lines {
            sqlx::query(UPSERT_LINE)
                .bind(&line.menu_id)
                .bind(&line.ingredient_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_lines")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(rows = lines.len(), stored, "Recipe lines replaced");
        Ok(stored as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
