//! # Sales Repository
//!
//! The append-only sales log (penjualan).
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows.json ──► cogs_core::import::import_sales ──► Vec<SalesRecord>    │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                                    SalesRepository::import              │
//! │                                    ├── check every record               │
//! │                                    ├── BEGIN                            │
//! │                                    ├── INSERT × n (same imported_at)    │
//! │                                    └── COMMIT   (nothing on error)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use cogs_core::analytics::SalesFilter;
use cogs_core::SalesRecord;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Repository for sales records.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    /// Creates a new SalesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalesRepository { pool }
    }

    /// Lists every record in import order.
    pub async fn list(&self) -> DbResult<Vec<SalesRecord>> {
        self.list_filtered(&SalesFilter::default()).await
    }

    /// Lists the records of one outlet and/or period, in import order.
    pub async fn list_filtered(&self, filter: &SalesFilter) -> DbResult<Vec<SalesRecord>> {
        debug!(outlet = ?filter.outlet, period = ?filter.period, "Listing sales");

        let records = sqlx::query_as::<_, SalesRecord>(
            r#"
            SELECT period, outlet, menu_id, quantity
            FROM sales_records
            WHERE (?1 IS NULL OR outlet = ?1)
              AND (?2 IS NULL OR period = ?2)
            ORDER BY id
            "#,
        )
        .bind(filter.outlet.as_deref())
        .bind(filter.period.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Appends `records` in one transaction and returns how many were
    /// written.
    ///
    /// Every record is checked first; one bad record rejects the batch and
    /// nothing is written.
    pub async fn import(&self, records: &[SalesRecord]) -> DbResult<u64> {
        for record in records {
            record.validate()?;
        }

        let imported_at = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut written = 0u64;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO sales_records (period, outlet, menu_id, quantity, imported_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&record.period)
            .bind(&record.outlet)
            .bind(&record.menu_id)
            .bind(record.quantity)
            .bind(imported_at)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;

        info!(count = written, "Sales imported");
        Ok(written)
    }

    /// Counts stored records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
