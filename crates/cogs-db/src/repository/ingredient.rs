//! # Ingredient Repository
//!
//! Database operations for ingredient master data (bahan).
//!
//! ## Two Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  upsert(ingredient)            replace_all(ingredients)                 │
//! │  ──────────────────            ─────────────────────────                │
//! │  single edit                   file import, one transaction            │
//! │  Ingredient::validate first    rows were checked by the import rules   │
//! │  factor must be > 0            a zero factor is stored and later       │
//! │                                reported by costing as unresolved       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cogs_core::Ingredient;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const SELECT_INGREDIENTS: &str = r#"
    SELECT
        id,
        name,
        category,
        purchase_unit,
        purchase_price,
        conversion_factor,
        small_unit,
        supplier,
        active
    FROM ingredients
"#;

const UPSERT_INGREDIENT: &str = r#"
    INSERT INTO ingredients (
        id, name, category, purchase_unit, purchase_price,
        conversion_factor, small_unit, supplier, active
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT (id) DO UPDATE SET
        name = excluded.name,
        category = excluded.category,
        purchase_unit = excluded.purchase_unit,
        purchase_price = excluded.purchase_price,
        conversion_factor = excluded.conversion_factor,
        small_unit = excluded.small_unit,
        supplier = excluded.supplier,
        active = excluded.active
"#;

/// Repository for ingredient database operations.
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IngredientRepository { pool }
    }

    /// Lists all ingredients in id order.
    pub async fn list(&self) -> DbResult<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(&format!("{SELECT_INGREDIENTS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(ingredients)
    }

    /// Gets an ingredient by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(Ingredient))` - Ingredient found
    /// * `Ok(None)` - No ingredient with this code
    pub async fn get(&self, id: &str) -> DbResult<Option<Ingredient>> {
        let ingredient =
            sqlx::query_as::<_, Ingredient>(&format!("{SELECT_INGREDIENTS} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(ingredient)
    }

    /// Inserts or updates one ingredient.
    ///
    /// ## Returns
    /// * `Err(DbError::Invalid)` - Blank code, negative price or a
    ///   conversion factor that is not positive
    pub async fn upsert(&self, ingredient: &Ingredient) -> DbResult<()> {
        ingredient.validate()?;

        debug!(id = %ingredient.id, "Upserting ingredient");

        let mut tx = self.pool.begin().await?;
        write(&mut tx, ingredient).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Deletes an ingredient.
    ///
    /// Recipe lines that use it stay in place; costing reports them as
    /// unresolved until the ingredient comes back.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No ingredient with this code
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting ingredient");

        let result = sqlx::query("DELETE FROM ingredients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ingredient", id));
        }

        Ok(())
    }

    /// Replaces the whole ingredient table with `ingredients`.
    ///
    /// Runs in one transaction: on any error the previous data is kept.
    /// A repeated code keeps its last row. Returns the number of rows
    /// stored, which is lower than `ingredients.len()` when codes repeat.
    pub async fn replace_all(&self, ingredients: &[Ingredient]) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM ingredients").execute(&mut *tx).await?;
        for ingredient in ingredients {
            write(&mut tx, ingredient).await?;
        }

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(rows = ingredients.len(), stored, "Ingredients replaced");
        Ok(stored as u64)
    }

    /// Counts stored ingredients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn write(tx: &mut Transaction<'_, Sqlite>, ingredient: &Ingredient) -> DbResult<()> {
    sqlx::query(UPSERT_INGREDIENT)
        .bind(&ingredient.id)
        .bind(&ingredient.name)
        .bind(&ingredient.category)
        .bind(&ingredient.purchase_unit)
        .bind(ingredient.purchase_price)
        .bind(ingredient.conversion_factor)
        .bind(&ingredient.small_unit)
        .bind(&ingredient.supplier)
        .bind(ingredient.active)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use cogs_core::catalog::seed_ingredients;
    use cogs_core::Ingredient;

    fn flour() -> Ingredient {
        seed_ingredients().into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn test_upsert_get_roundtrip() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.ingredients();

        repo.upsert(&flour()).await.unwrap();
        assert_eq!(repo.get("B001").await.unwrap(), Some(flour()));
        assert_eq!(repo.get("B999").await.unwrap(), None);

        let mut repriced = flour();
        repriced.purchase_price = 160_000.0;
        repriced.active = false;
        repo.upsert(&repriced).await.unwrap();

        let stored = repo.get("B001").await.unwrap().unwrap();
        assert_eq!(stored.purchase_price, 160_000.0);
        assert!(!stored.active);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_rejects_zero_factor() {
        let db = Database::in_memory().await.unwrap();
        let mut bad = flour();
        bad.conversion_factor = 0.0;

        let err = db.ingredients().upsert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(db.ingredients().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.ingredients();
        repo.upsert(&flour()).await.unwrap();

        repo.delete("B001").await.unwrap();
        assert!(repo.get("B001").await.unwrap().is_none());

        let err = repo.delete("B001").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_replace_all_swaps_the_table() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.ingredients();
        repo.replace_all(&seed_ingredients()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 10);

        let mut first = flour();
        first.name = "Tepung Protein Tinggi".to_string();
        let mut repeated = first.clone();
        repeated.purchase_price = 155_000.0;

        let stored = repo.replace_all(&[first, repeated]).await.unwrap();
        assert_eq!(stored, 1);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].purchase_price, 155_000.0);
    }
}
