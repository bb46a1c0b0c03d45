//! # Starter Data
//!
//! Fills an empty database with the catalog from [`cogs_core::catalog`]:
//! eight menus, ten ingredients, seventeen recipe lines, default pricing
//! and a year of sales for five outlets.

use cogs_core::catalog;
use serde::Serialize;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;

/// What [`seed_database`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub menus: u64,
    pub ingredients: u64,
    pub recipe_lines: u64,
    pub pricing: u64,
    pub sales: u64,
}

/// Seeds the catalog and the sales of `year`.
///
/// Does nothing if any menu is already stored, so running it twice never
/// duplicates sales.
pub async fn seed_database(db: &Database, year: i32) -> DbResult<Option<SeedSummary>> {
    let existing = db.menus().count().await?;
    if existing > 0 {
        info!(menus = existing, "Database already seeded, skipping");
        return Ok(None);
    }

    let mut summary = SeedSummary::default();

    for menu in catalog::seed_menus() {
        db.menus().upsert(&menu).await?;
        summary.menus += 1;
    }

    summary.ingredients = db.ingredients().replace_all(&catalog::seed_ingredients()).await?;
    summary.recipe_lines = db.recipes().replace_all(&catalog::seed_recipe_lines()).await?;

    for (menu_id, params) in catalog::seed_pricing() {
        db.pricing().upsert(&menu_id, params).await?;
        summary.pricing += 1;
    }

    summary.sales = db.sales().import(&catalog::seed_sales(year)).await?;

    info!(
        menus = summary.menus,
        ingredients = summary.ingredients,
        recipe_lines = summary.recipe_lines,
        sales = summary.sales,
        "Seed complete"
    );

    Ok(Some(summary))
}
