//! Command implementations. Each returns the text to print so it can be
//! exercised against an in-memory database.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{bail, Context, Result};
use cogs_core::analytics::{self, SalesFilter, SalesSummary};
use cogs_core::costing::UnresolvedLine;
use cogs_core::import::{import_ingredients, import_recipe_lines, import_sales, rows_from_json};
use cogs_core::{CostingResult, ImportKind, Role};
use cogs_db::Database;
use serde::Serialize;

use crate::render;

// =============================================================================
// report
// =============================================================================

#[derive(Serialize)]
struct ReportOutput<'a> {
    results: &'a [CostingResult],
    unresolved: &'a [UnresolvedLine],
}

pub async fn report(db: &Database, json: bool) -> Result<String> {
    let report = db.costing_report().await?;

    if json {
        let output = ReportOutput {
            results: &report.results,
            unresolved: &report.unresolved,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    Ok(render::costing_table(&report))
}

// =============================================================================
// sales
// =============================================================================

/// KPIs and breakdowns for one outlet/period selection.
#[derive(Debug, Clone, Serialize)]
pub struct SalesDashboard {
    pub filter: SalesFilter,
    pub records: usize,
    pub summary: SalesSummary,
    pub revenue_by_outlet: BTreeMap<String, f64>,
    pub margin_by_period: BTreeMap<String, f64>,
    pub revenue_by_menu: BTreeMap<String, f64>,
}

pub async fn dashboard(db: &Database, filter: SalesFilter) -> Result<SalesDashboard> {
    let sales = db.enriched_sales(&filter).await?;

    Ok(SalesDashboard {
        records: sales.len(),
        summary: analytics::summarize(&sales),
        revenue_by_outlet: analytics::revenue_by_outlet(&sales),
        margin_by_period: analytics::margin_by_period(&sales),
        revenue_by_menu: analytics::revenue_by_menu(&sales),
        filter,
    })
}

pub async fn sales(
    db: &Database,
    outlet: Option<String>,
    period: Option<String>,
    json: bool,
) -> Result<String> {
    let dashboard = dashboard(db, SalesFilter::new(outlet, period)).await?;

    if json {
        return Ok(serde_json::to_string_pretty(&dashboard)?);
    }

    Ok(render::sales_dashboard(&dashboard))
}

// =============================================================================
// import
// =============================================================================

/// What an accepted import wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub kind: ImportKind,
    pub written: u64,
    /// Ingredients and recipes replace the stored set; sales are appended.
    pub replaced: bool,
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.replaced {
            write!(f, "{} import: {} rows stored, previous data replaced", self.kind, self.written)
        } else {
            write!(f, "{} import: {} rows appended", self.kind, self.written)
        }
    }
}

/// Imports a JSON array of rows.
///
/// Nothing is written unless the role may edit and every row passes the
/// import checks for `kind`.
pub async fn import(db: &Database, kind: ImportKind, text: &str, role: Role) -> Result<ImportOutcome> {
    role.ensure_can_edit()?;

    let rows = rows_from_json(text).context("import file must be a JSON array of objects")?;
    if rows.is_empty() {
        bail!("{} import file has no rows", kind);
    }

    let (written, replaced) = match kind {
        ImportKind::Ingredients => {
            let ingredients = import_ingredients(&rows)?;
            (db.ingredients().replace_all(&ingredients).await?, true)
        }
        ImportKind::RecipeLines => {
            let lines = import_recipe_lines(&rows)?;
            (db.recipes().replace_all(&lines).await?, true)
        }
        ImportKind::Sales => {
            let records = import_sales(&rows)?;
            (db.sales().import(&records).await?, false)
        }
    };

    Ok(ImportOutcome {
        kind,
        written,
        replaced,
    })
}

// =============================================================================
// export
// =============================================================================

/// Enriched sales serialized as JSON Lines, one record per line.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesExport {
    pub rows: usize,
    pub body: String,
}

/// Exports the sales matching `filter`, each priced with the current
/// costing.
///
/// Only admins may export.
pub async fn export(db: &Database, filter: SalesFilter, role: Role) -> Result<SalesExport> {
    role.ensure_can_edit()?;

    let sales = db.enriched_sales(&filter).await?;
    let lines = sales
        .iter()
        .map(serde_json::to_string)
        .collect::<serde_json::Result<Vec<_>>>()?;

    Ok(SalesExport {
        rows: lines.len(),
        body: lines.join("\n"),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cogs_core::{CoreError, ImportError};
    use cogs_db::seed::seed_database;

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        seed_database(&db, 2025).await.unwrap();
        db
    }

    const INGREDIENT_ROWS: &str = r#"[
        {"BahanID": "B001", "NamaBahan": "Tepung Terigu", "Kategori": "Bahan Kering",
         "SatuanBeli": "kg", "HargaBeli": 160000, "KonversiKeKecil": 1000,
         "SatuanKecil": "gram", "Supplier": "Supplier A"},
        {"BahanID": "B003", "NamaBahan": "Susu Cair", "SatuanBeli": "liter",
         "HargaBeli": "20000", "KonversiKeKecil": "1000", "SatuanKecil": "ml"},
        {"BahanID": "B004", "NamaBahan": "Telur", "SatuanBeli": "tray",
         "HargaBeli": 36000, "KonversiKeKecil": 30, "SatuanKecil": "butir"}
    ]"#;

    #[tokio::test]
    async fn test_viewer_cannot_import() {
        let db = seeded().await;
        let err = import(&db, ImportKind::Ingredients, INGREDIENT_ROWS, Role::Viewer)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Forbidden { role: Role::Viewer })
        ));
        assert_eq!(db.ingredients().count().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_ingredient_import_replaces_and_reprices() {
        let db = seeded().await;
        let outcome = import(&db, ImportKind::Ingredients, INGREDIENT_ROWS, Role::Admin)
            .await
            .unwrap();

        assert_eq!(outcome.written, 3);
        assert!(outcome.replaced);
        assert_eq!(db.ingredients().count().await.unwrap(), 3);

        // 150g at Rp 160/g + 200ml milk + 1 egg
        let report = db.costing_report().await.unwrap();
        let pancake = report.get("M001").unwrap();
        assert!((pancake.raw_cost - 29_200.0).abs() < 1e-6);
        assert!(!report.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_file_writes_nothing() {
        let db = seeded().await;
        let rows = r#"[
            {"Bulan": "2025-01", "Outlet": "Outlet A", "MenuID": "M001", "QtyTerjual": 10},
            {"Bulan": "2025-01", "Outlet": "", "MenuID": "M002", "QtyTerjual": "sepuluh"}
        ]"#;

        let err = import(&db, ImportKind::Sales, rows, Role::Admin)
            .await
            .unwrap_err();

        let rejected = err.downcast_ref::<ImportError>().unwrap();
        assert_eq!(rejected.issues.len(), 2);
        assert_eq!(rejected.first_issue().unwrap().to_string(), "Row 3 Outlet required");
        assert_eq!(db.sales().count().await.unwrap(), 480);
    }

    #[tokio::test]
    async fn test_sales_import_appends() {
        let db = seeded().await;
        let rows = r#"[{"Bulan": "2026-01", "Outlet": "Outlet F", "MenuID": "M001", "QtyTerjual": 10}]"#;

        let outcome = import(&db, ImportKind::Sales, rows, Role::Admin).await.unwrap();
        assert_eq!(outcome.to_string(), "Sales import: 1 rows appended");
        assert_eq!(db.sales().count().await.unwrap(), 481);
    }

    #[tokio::test]
    async fn test_empty_and_malformed_files() {
        let db = seeded().await;
        assert!(import(&db, ImportKind::RecipeLines, "[]", Role::Admin).await.is_err());
        assert!(import(&db, ImportKind::RecipeLines, "{\"not\": \"rows\"}", Role::Admin)
            .await
            .is_err());
        assert_eq!(db.recipes().list().await.unwrap().len(), 17);
    }

    #[tokio::test]
    async fn test_dashboard_for_one_outlet() {
        let db = seeded().await;
        let dashboard = dashboard(&db, SalesFilter::new(Some("Outlet B".to_string()), None))
            .await
            .unwrap();

        assert_eq!(dashboard.records, 12 * 8);
        assert_eq!(dashboard.revenue_by_outlet.len(), 1);
        assert_eq!(dashboard.margin_by_period.len(), 12);
        assert_eq!(dashboard.revenue_by_menu.len(), 8);

        // Every seeded menu carries a 60% markup, so margin is 0.6 / 1.6.
        assert!((dashboard.summary.margin_fraction - 0.375).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_duplicate_ingredient_codes_count_once() {
        let db = seeded().await;
        let rows = r#"[
            {"BahanID": "B001", "NamaBahan": "Tepung Terigu", "SatuanBeli": "kg",
             "HargaBeli": 150000, "KonversiKeKecil": 1000, "SatuanKecil": "gram"},
            {"BahanID": "B001", "NamaBahan": "Tepung Terigu", "SatuanBeli": "kg",
             "HargaBeli": 155000, "KonversiKeKecil": 1000, "SatuanKecil": "gram"}
        ]"#;

        let outcome = import(&db, ImportKind::Ingredients, rows, Role::Admin).await.unwrap();
        assert_eq!(outcome.written, 1);
        assert_eq!(db.ingredients().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_viewer_cannot_export() {
        let db = seeded().await;
        let err = export(&db, SalesFilter::default(), Role::Viewer)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Forbidden { role: Role::Viewer })
        ));
    }

    #[tokio::test]
    async fn test_export_contains_only_filtered_rows() {
        let db = seeded().await;
        let filter = SalesFilter::new(Some("Outlet A".to_string()), Some("2025-01".to_string()));
        let export = export(&db, filter, Role::Admin).await.unwrap();

        assert_eq!(export.rows, 8);
        let lines: Vec<&str> = export.body.lines().collect();
        assert_eq!(lines.len(), 8);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["outlet"], "Outlet A");
            assert_eq!(value["period"], "2025-01");
            assert!(value["total_revenue"].as_f64().unwrap() > 0.0);
            let profit = value["total_revenue"].as_f64().unwrap() - value["total_cost"].as_f64().unwrap();
            assert!((value["gross_profit"].as_f64().unwrap() - profit).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_report_json_lists_every_menu() {
        let db = seeded().await;
        let json = report(&db, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 8);
        assert_eq!(value["results"][0]["menu_id"], "M001");
    }
}
