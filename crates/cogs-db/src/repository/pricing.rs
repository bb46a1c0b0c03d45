//! # Pricing Repository
//!
//! Overhead and markup fractions per menu. Menus without a row price at
//! 0 / 0.

use cogs_core::validation::validate_code;
use cogs_core::{PricingParams, PricingTable};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for pricing parameters.
#[derive(Debug, Clone)]
pub struct PricingRepository {
    pool: SqlitePool,
}

impl PricingRepository {
    /// Creates a new PricingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricingRepository { pool }
    }

    /// Loads every stored entry, keyed by menu id.
    pub async fn load(&self) -> DbResult<PricingTable> {
        let rows = sqlx::query_as::<_, (String, f64, f64)>(
            "SELECT menu_id, overhead, markup FROM pricing_params",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(menu_id, overhead, markup)| (menu_id, PricingParams::new(overhead, markup)))
            .collect())
    }

    /// Sets the overhead and markup of one menu.
    pub async fn upsert(&self, menu_id: &str, params: PricingParams) -> DbResult<()> {
        validate_code("menu_id", menu_id)?;
        params.validate()?;

        debug!(
            menu_id = %menu_id,
            overhead = params.overhead,
            markup = params.markup,
            "Upserting pricing"
        );

        sqlx::query(
            r#"
            INSERT INTO pricing_params (menu_id, overhead, markup) VALUES (?1, ?2, ?3)
            ON CONFLICT (menu_id) DO UPDATE SET
                overhead = excluded.overhead,
                markup = excluded.markup
            "#,
        )
        .bind(menu_id)
        .bind(params.overhead)
        .bind(params.markup)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use cogs_core::PricingParams;

    #[tokio::test]
    async fn test_upsert_and_load() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.pricing();
        assert!(repo.load().await.unwrap().is_empty());

        repo.upsert("M001", PricingParams::new(0.10, 0.60)).await.unwrap();
        repo.upsert("M002", PricingParams::new(0.05, 0.50)).await.unwrap();
        repo.upsert("M001", PricingParams::new(0.15, 0.70)).await.unwrap();

        let table = repo.load().await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["M001"], PricingParams::new(0.15, 0.70));
        assert_eq!(table["M002"], PricingParams::new(0.05, 0.50));
    }

    #[tokio::test]
    async fn test_negative_markup_rejected() {
        let db = Database::in_memory().await.unwrap();
        let err = db
            .pricing()
            .upsert("M001", PricingParams::new(0.10, -0.2))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
    }
}
