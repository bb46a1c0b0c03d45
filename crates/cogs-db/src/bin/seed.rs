//! # Seed Data Generator
//!
//! Populates an empty database with the starter catalog and a year of sales.
//!
//! ## Usage
//! ```bash
//! # Seed ./cogs.db (or $COGS_DATABASE) with 2025 sales
//! cargo run -p cogs-db --bin seed
//!
//! # Pick the database and the sales year
//! cargo run -p cogs-db --bin seed -- --db ./data/outlets.db --year 2026
//! ```
//!
//! ## Generated Data
//! - 8 menus, 10 ingredients, 17 recipe lines
//! - 10% overhead and 60% markup on every menu
//! - One sales row per month, outlet and menu (480 rows)
//!
//! A database that already has menus is left untouched.

use anyhow::{Context, Result};
use clap::Parser;
use cogs_core::catalog;
use cogs_db::{Database, DbConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Populate an empty COGS database with starter data", long_about = None)]
struct Args {
    /// Database file path
    #[arg(short, long, env = "COGS_DATABASE", default_value = cogs_db::config::DEFAULT_DATABASE_PATH)]
    db: String,

    /// Year to generate monthly sales for
    #[arg(short, long, default_value_t = catalog::SEED_YEAR)]
    year: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!(db = %args.db, year = args.year, "Seeding database");

    let db = Database::new(DbConfig::new(&args.db))
        .await
        .with_context(|| format!("opening {}", args.db))?;

    match cogs_db::seed::seed_database(&db, args.year).await? {
        Some(summary) => {
            println!("Seeded {}", args.db);
            println!("  menus:        {}", summary.menus);
            println!("  ingredients:  {}", summary.ingredients);
            println!("  recipe lines: {}", summary.recipe_lines);
            println!("  pricing:      {}", summary.pricing);
            println!("  sales:        {}", summary.sales);
        }
        None => {
            println!("{} already has a catalog; nothing seeded.", args.db);
            println!("Delete the database file to regenerate.");
        }
    }

    db.close().await;
    Ok(())
}
