//! # cogs-db: Database Layer for the COGS suite
//!
//! This crate stores ingredients, recipes, pricing and sales in SQLite and
//! feeds them to the costing engine in `cogs-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        COGS Data Flow                                   │
//! │                                                                         │
//! │  cogs CLI (report / sales / import)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cogs-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ MenuRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ IngredientRepo│    │ 001_init.sql │  │   │
//! │  │   │ costing_report│    │ RecipeRepo    │    │              │  │   │
//! │  │   │               │    │ PricingRepo   │    │              │  │   │
//! │  │   │               │    │ SalesRepo     │    │              │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              │ load all inputs                                          │
//! │              ▼                                                          │
//! │  cogs_core::compute_costing ──► CostingReport                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (./cogs.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool settings, read from the environment
//! - [`pool`] - Connection pool and the [`Database`] handle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per stored entity
//! - [`seed`] - Starter data for an empty database
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cogs_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let report = db.costing_report().await?;
//! for row in &report.results {
//!     println!("{} {}", row.menu_id, row.selling_price);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;

// Repository re-exports for convenience
pub use repository::ingredient::IngredientRepository;
pub use repository::menu::MenuRepository;
pub use repository::pricing::PricingRepository;
pub use repository::recipe::RecipeRepository;
pub use repository::sales::SalesRepository;
