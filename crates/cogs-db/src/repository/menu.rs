//! # Menu Repository
//!
//! The menu catalog. Its order decides the order of costing results.

use cogs_core::validation::{validate_code, validate_name};
use cogs_core::Menu;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for menu database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists the catalog in menu id order.
    pub async fn list(&self) -> DbResult<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>("SELECT id, name FROM menus ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(menus)
    }

    /// Inserts a menu or renames an existing one.
    pub async fn upsert(&self, menu: &Menu) -> DbResult<()> {
        validate_code("id", &menu.id)?;
        validate_name("name", &menu.name)?;

        debug!(id = %menu.id, "Upserting menu");

        sqlx::query(
            r#"
            INSERT INTO menus (id, name) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name
            "#,
        )
        .bind(&menu.id)
        .bind(&menu.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts catalog entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use cogs_core::Menu;

    #[tokio::test]
    async fn test_upsert_and_list_in_id_order() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.menus();

        repo.upsert(&Menu::new("M002", "Coffee Latte")).await.unwrap();
        repo.upsert(&Menu::new("M001", "Pancake")).await.unwrap();
        repo.upsert(&Menu::new("M001", "Pancake Original")).await.unwrap();

        let menus = repo.list().await.unwrap();
        assert_eq!(
            menus,
            vec![
                Menu::new("M001", "Pancake Original"),
                Menu::new("M002", "Coffee Latte"),
            ]
        );
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_name() {
        let db = Database::in_memory().await.unwrap();
        let err = db.menus().upsert(&Menu::new("M001", "  ")).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
    }
}
