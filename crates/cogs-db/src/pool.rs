//! # Database Pool Management
//!
//! Connection pool creation and the [`Database`] handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  CLI Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() ← COGS_DATABASE, COGS_DB_MAX_CONNECTIONS         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.menus() / db.ingredients() / db.recipes() / db.pricing() / ...     │
//! │  db.costing_report() ──► cogs_core::compute_costing                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL (Write-Ahead Logging) mode so report queries
//! don't block an import that is writing.

use std::str::FromStr;

use cogs_core::analytics::SalesFilter;
use cogs_core::{compute_costing, enrich_sales, CostingReport, EnrichedSale};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::ingredient::IngredientRepository;
use crate::repository::menu::MenuRepository;
use crate::repository::pricing::PricingRepository;
use crate::repository::recipe::RecipeRepository;
use crate::repository::sales::SalesRepository;

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads (file databases)
    ///    - NORMAL synchronous (balance of safety/speed)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection or migration failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        if config.is_in_memory() {
            // Retiring the only connection would drop the data with it.
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Opens a fresh, migrated in-memory database.
    pub async fn in_memory() -> DbResult<Self> {
        Database::new(DbConfig::in_memory()).await
    }

    /// Runs database migrations.
    ///
    /// ## When To Call
    /// - Automatically called by `new()` if `run_migrations` is true
    /// - Manually call when migrations are disabled in config
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn menus(&self) -> MenuRepository {
        MenuRepository::new(self.pool.clone())
    }

    pub fn ingredients(&self) -> IngredientRepository {
        IngredientRepository::new(self.pool.clone())
    }

    pub fn recipes(&self) -> RecipeRepository {
        RecipeRepository::new(self.pool.clone())
    }

    pub fn pricing(&self) -> PricingRepository {
        PricingRepository::new(self.pool.clone())
    }

    pub fn sales(&self) -> SalesRepository {
        SalesRepository::new(self.pool.clone())
    }

    /// Computes the costing report from everything currently stored.
    ///
    /// ## What This Does
    /// ```text
    /// menus ─────────┐
    /// ingredients ───┤
    /// recipe_lines ──┼──► compute_costing ──► CostingReport
    /// pricing ───────┘                            │
    ///                                             └──► warn! per unresolved line
    /// ```
    ///
    /// The report is derived on every call; nothing computed is stored.
    pub async fn costing_report(&self) -> DbResult<CostingReport> {
        let menus = self.menus().list().await?;
        let ingredients = self.ingredients().list().await?;
        let recipe_lines = self.recipes().list().await?;
        let pricing = self.pricing().load().await?;

        let report = compute_costing(&ingredients, &recipe_lines, &pricing, &menus);

        for line in &report.unresolved {
            warn!(
                menu_id = %line.menu_id,
                ingredient_id = %line.ingredient_id,
                reason = ?line.reason,
                "Recipe line skipped in costing"
            );
        }

        debug!(
            menus = report.results.len(),
            unresolved = report.unresolved.len(),
            "Costing report computed"
        );

        Ok(report)
    }

    /// Loads the sales matching `filter`, priced with the current costing.
    pub async fn enriched_sales(&self, filter: &SalesFilter) -> DbResult<Vec<EnrichedSale>> {
        let report = self.costing_report().await?;
        let sales = self.sales().list_filtered(filter).await?;
        Ok(enrich_sales(&sales, &report.by_menu_id))
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cogs_core::catalog;
    use cogs_core::costing::SkipReason;
    use cogs_core::{Ingredient, RecipeLine};

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        crate::seed::seed_database(&db, catalog::SEED_YEAR).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_empty_database_reports_nothing() {
        let db = Database::in_memory().await.unwrap();
        let report = db.costing_report().await.unwrap();
        assert!(report.results.is_empty());
        assert!(report.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_costing_report_from_seed() {
        let db = seeded().await;
        let report = db.costing_report().await.unwrap();

        assert_eq!(report.results.len(), 8);
        assert!(report.unresolved.is_empty());

        // Pancake: 150g flour (22500) + 200ml milk (4000) + 1 egg (1200)
        let pancake = report.get("M001").unwrap();
        assert!((pancake.raw_cost - 27_700.0).abs() < 1e-6);
        assert!((pancake.hpp - 30_470.0).abs() < 1e-6);
        assert!((pancake.selling_price - 48_752.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_costing_report_lists_unresolved_lines() {
        let db = seeded().await;
        db.recipes()
            .upsert(&RecipeLine::new("M005", "B999", 3.0))
            .await
            .unwrap();

        // A zero factor can only arrive through an import.
        let mut ingredients: Vec<Ingredient> = db.ingredients().list().await.unwrap();
        for ingredient in ingredients.iter_mut().filter(|i| i.id == "B010") {
            ingredient.conversion_factor = 0.0;
        }
        db.ingredients().replace_all(&ingredients).await.unwrap();

        let report = db.costing_report().await.unwrap();
        let skipped: Vec<(&str, &str, SkipReason)> = report
            .unresolved
            .iter()
            .map(|u| (u.menu_id.as_str(), u.ingredient_id.as_str(), u.reason))
            .collect();
        assert_eq!(skipped.len(), 2);
        assert!(skipped.contains(&("M005", "B999", SkipReason::UnknownIngredient)));
        assert!(skipped.contains(&("M008", "B010", SkipReason::InvalidConversionFactor)));

        // Fried egg still costs its two eggs.
        assert!((report.get("M005").unwrap().raw_cost - 2_400.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_enriched_sales_filter() {
        let db = seeded().await;

        let all = db.enriched_sales(&SalesFilter::default()).await.unwrap();
        assert_eq!(all.len(), 480);

        let filter = SalesFilter::new(Some("Outlet A".to_string()), Some("2025-01".to_string()));
        let subset = db.enriched_sales(&filter).await.unwrap();
        assert_eq!(subset.len(), 8);
        assert!(subset.iter().all(|s| s.outlet == "Outlet A" && s.period == "2025-01"));
        assert!(subset.iter().all(|s| s.total_revenue > 0.0));
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
