//! # Import Module
//!
//! Validation and typed mapping for tabular imports (ingredients, recipe
//! lines, sales).
//!
//! ## Import Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Parsed rows (column header → raw string), source order preserved      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_rows(kind, rows) ← required + numeric checks                 │
//! │       │                                                                 │
//! │       ├── issues? → ImportError (whole file rejected,                  │
//! │       │             first issue shown: "Row 2 HargaBeli must be numeric")│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  import_ingredients / import_recipe_lines / import_sales               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Ingredient> / Vec<RecipeLine> / Vec<SalesRecord>                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Numbers
//! Issues carry the number a spreadsheet user sees: the first data row sits
//! under the header, so it is row 2 ([`ROW_NUMBER_OFFSET`]).
//!
//! ## Numbers
//! A numeric cell is the decimal text of a finite number, surrounding
//! whitespace allowed (`"150000"`, `" 0.5 "`, `"1e3"`). `"abc"`, `"NaN"`,
//! `"inf"` and whitespace-only cells are rejected.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ImportError;
use crate::types::{Ingredient, RecipeLine, SalesRecord};
use crate::ROW_NUMBER_OFFSET;

/// One parsed data row: column header → raw cell text.
pub type ImportRow = HashMap<String, String>;

/// Message for a missing or empty required cell.
pub const MSG_REQUIRED: &str = "required";

/// Message for a cell that should hold a number but doesn't.
pub const MSG_NOT_NUMERIC: &str = "must be numeric";

/// Column headers of the import templates.
pub mod columns {
    pub const INGREDIENT_ID: &str = "BahanID";
    pub const INGREDIENT_NAME: &str = "NamaBahan";
    pub const CATEGORY: &str = "Kategori";
    pub const PURCHASE_UNIT: &str = "SatuanBeli";
    pub const PURCHASE_PRICE: &str = "HargaBeli";
    pub const CONVERSION_FACTOR: &str = "KonversiKeKecil";
    pub const SMALL_UNIT: &str = "SatuanKecil";
    pub const SUPPLIER: &str = "Supplier";

    pub const MENU_ID: &str = "MenuID";
    pub const RECIPE_QTY: &str = "QtyResep";

    pub const PERIOD: &str = "Bulan";
    pub const OUTLET: &str = "Outlet";
    pub const SOLD_QTY: &str = "QtyTerjual";
}

// =============================================================================
// Validation Issue
// =============================================================================

/// One problem found in one cell of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationIssue {
    /// Spreadsheet row number (first data row = 2).
    pub row_number: usize,
    /// Column header.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    /// Required-cell issue for the data row at zero-based `index`.
    pub fn required(index: usize, field: &str) -> Self {
        ValidationIssue {
            row_number: index + ROW_NUMBER_OFFSET,
            field: field.to_string(),
            message: MSG_REQUIRED.to_string(),
        }
    }

    /// Numeric-format issue for the data row at zero-based `index`.
    pub fn numeric(index: usize, field: &str) -> Self {
        ValidationIssue {
            row_number: index + ROW_NUMBER_OFFSET,
            field: field.to_string(),
            message: MSG_NOT_NUMERIC.to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} {} {}", self.row_number, self.field, self.message)
    }
}

// =============================================================================
// Import Kind
// =============================================================================

/// Which entity a file of rows holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Ingredients,
    RecipeLines,
    Sales,
}

impl ImportKind {
    /// Columns that must be present and non-empty on every row.
    pub const fn required_fields(&self) -> &'static [&'static str] {
        use columns::*;
        match self {
            ImportKind::Ingredients => &[
                INGREDIENT_ID,
                INGREDIENT_NAME,
                PURCHASE_UNIT,
                PURCHASE_PRICE,
                CONVERSION_FACTOR,
                SMALL_UNIT,
            ],
            ImportKind::RecipeLines => &[MENU_ID, INGREDIENT_ID, RECIPE_QTY],
            ImportKind::Sales => &[PERIOD, OUTLET, MENU_ID, SOLD_QTY],
        }
    }

    /// Columns that must parse as numbers when non-empty.
    pub const fn numeric_fields(&self) -> &'static [&'static str] {
        use columns::*;
        match self {
            ImportKind::Ingredients => &[PURCHASE_PRICE, CONVERSION_FACTOR],
            ImportKind::RecipeLines => &[RECIPE_QTY],
            ImportKind::Sales => &[SOLD_QTY],
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportKind::Ingredients => "Ingredients",
            ImportKind::RecipeLines => "Recipe lines",
            ImportKind::Sales => "Sales",
        })
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Parses a numeric cell. `None` unless the trimmed text is a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_blank(row: &ImportRow, field: &str) -> bool {
    row.get(field).map_or(true, |value| value.is_empty())
}

/// Checks every row for missing required cells and malformed numbers.
///
/// Per row, issues come in column order: all `required` issues first, then
/// `must be numeric` issues. A numeric column that is missing reports only
/// `required`. An empty result means the rows are accepted.
pub fn validate(rows: &[ImportRow], required: &[&str], numeric: &[&str]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        for field in required {
            if is_blank(row, field) {
                issues.push(ValidationIssue::required(index, field));
            }
        }

        for field in numeric {
            match row.get(*field) {
                Some(value) if !value.is_empty() && parse_number(value).is_none() => {
                    issues.push(ValidationIssue::numeric(index, field));
                }
                _ => {}
            }
        }
    }

    issues
}

/// Validates rows against the rules of `kind`.
pub fn validate_rows(kind: ImportKind, rows: &[ImportRow]) -> Vec<ValidationIssue> {
    validate(rows, kind.required_fields(), kind.numeric_fields())
}

pub fn validate_ingredient_rows(rows: &[ImportRow]) -> Vec<ValidationIssue> {
    validate_rows(ImportKind::Ingredients, rows)
}

pub fn validate_recipe_rows(rows: &[ImportRow]) -> Vec<ValidationIssue> {
    validate_rows(ImportKind::RecipeLines, rows)
}

pub fn validate_sales_rows(rows: &[ImportRow]) -> Vec<ValidationIssue> {
    validate_rows(ImportKind::Sales, rows)
}

/// Reads rows from a JSON array of objects.
///
/// String cells are taken verbatim, numbers and booleans are rendered as
/// text, and `null` cells are treated as absent, the same shape a CSV
/// parser hands over.
pub fn rows_from_json(json: &str) -> serde_json::Result<Vec<ImportRow>> {
    let raw: Vec<HashMap<String, serde_json::Value>> = serde_json::from_str(json)?;

    Ok(raw
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .filter_map(|(header, value)| {
                    let text = match value {
                        serde_json::Value::Null => return None,
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    Some((header, text))
                })
                .collect()
        })
        .collect())
}

// =============================================================================
// Typed Mapping
// =============================================================================

fn ensure_valid(kind: ImportKind, rows: &[ImportRow]) -> Result<(), ImportError> {
    let issues = validate_rows(kind, rows);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ImportError { kind, issues })
    }
}

fn text(row: &ImportRow, field: &str) -> String {
    row.get(field).cloned().unwrap_or_default()
}

// Only called after `ensure_valid`, so the cell is present and numeric.
fn number(row: &ImportRow, field: &str) -> f64 {
    row.get(field)
        .and_then(|value| parse_number(value))
        .unwrap_or_default()
}

/// Turns ingredient rows into records, or rejects the whole file.
///
/// `Kategori` and `Supplier` are optional; imported ingredients are active.
pub fn import_ingredients(rows: &[ImportRow]) -> Result<Vec<Ingredient>, ImportError> {
    use columns::*;
    ensure_valid(ImportKind::Ingredients, rows)?;

    Ok(rows
        .iter()
        .map(|row| Ingredient {
            id: text(row, INGREDIENT_ID),
            name: text(row, INGREDIENT_NAME),
            category: text(row, CATEGORY),
            purchase_unit: text(row, PURCHASE_UNIT),
            purchase_price: number(row, PURCHASE_PRICE),
            conversion_factor: number(row, CONVERSION_FACTOR),
            small_unit: text(row, SMALL_UNIT),
            supplier: text(row, SUPPLIER),
            active: true,
        })
        .collect())
}

/// Turns recipe rows into recipe lines, or rejects the whole file.
pub fn import_recipe_lines(rows: &[ImportRow]) -> Result<Vec<RecipeLine>, ImportError> {
    use columns::*;
    ensure_valid(ImportKind::RecipeLines, rows)?;

    Ok(rows
        .iter()
        .map(|row| {
            RecipeLine::new(
                text(row, MENU_ID),
                text(row, INGREDIENT_ID),
                number(row, RECIPE_QTY),
            )
        })
        .collect())
}

/// Turns sales rows into sales records, or rejects the whole file.
pub fn import_sales(rows: &[ImportRow]) -> Result<Vec<SalesRecord>, ImportError> {
    use columns::*;
    ensure_valid(ImportKind::Sales, rows)?;

    Ok(rows
        .iter()
        .map(|row| {
            SalesRecord::new(
                text(row, PERIOD),
                text(row, OUTLET),
                text(row, MENU_ID),
                number(row, SOLD_QTY),
            )
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> ImportRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn flour_row() -> ImportRow {
        row(&[
            ("BahanID", "B001"),
            ("NamaBahan", "Tepung Terigu"),
            ("SatuanBeli", "kg"),
            ("HargaBeli", "150000"),
            ("KonversiKeKecil", "1000"),
            ("SatuanKecil", "gram"),
        ])
    }

    #[test]
    fn test_valid_rows_have_no_issues() {
        assert!(validate_ingredient_rows(&[flour_row(), flour_row()]).is_empty());
        assert!(validate_ingredient_rows(&[]).is_empty());
    }

    #[test]
    fn test_missing_numeric_field_reports_required_only() {
        let mut r = flour_row();
        r.remove("HargaBeli");

        let issues = validate_ingredient_rows(&[r]);
        assert_eq!(issues, vec![ValidationIssue::required(0, "HargaBeli")]);
        assert_eq!(issues[0].message, "required");
    }

    #[test]
    fn test_empty_cell_is_required_issue() {
        let mut r = flour_row();
        r.insert("KonversiKeKecil".to_string(), String::new());

        let issues = validate_ingredient_rows(&[r]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "KonversiKeKecil");
        assert_eq!(issues[0].message, MSG_REQUIRED);
    }

    #[test]
    fn test_non_numeric_price_reports_row_offset_by_two() {
        let mut bad = flour_row();
        bad.insert("HargaBeli".to_string(), "abc".to_string());

        let issues = validate_ingredient_rows(&[flour_row(), flour_row(), bad]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row_number, 4);
        assert_eq!(issues[0].field, "HargaBeli");
        assert_eq!(issues[0].message, "must be numeric");
        assert_eq!(issues[0].to_string(), "Row 4 HargaBeli must be numeric");
    }

    #[test]
    fn test_required_issues_precede_numeric_issues_within_a_row() {
        let r = row(&[("MenuID", "M001"), ("QtyTerjual", "lots")]);

        let issues = validate_sales_rows(&[r]);
        let summary: Vec<(String, String)> = issues
            .iter()
            .map(|i| (i.field.clone(), i.message.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Bulan".to_string(), "required".to_string()),
                ("Outlet".to_string(), "required".to_string()),
                ("QtyTerjual".to_string(), "must be numeric".to_string()),
            ]
        );
        assert!(issues.iter().all(|i| i.row_number == 2));
    }

    #[test]
    fn test_optional_columns_are_not_required() {
        let r = flour_row();
        assert!(!r.contains_key("Kategori"));
        assert!(!r.contains_key("Supplier"));
        assert!(validate_ingredient_rows(&[r]).is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("150000"), Some(150_000.0));
        assert_eq!(parse_number(" 0.5 "), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("   "), None);
    }

    #[test]
    fn test_import_ingredients_maps_rows() {
        let mut r = flour_row();
        r.insert("Supplier".to_string(), "Supplier A".to_string());

        let imported = import_ingredients(&[r]).unwrap();
        assert_eq!(imported.len(), 1);
        let flour = &imported[0];
        assert_eq!(flour.id, "B001");
        assert_eq!(flour.purchase_price, 150_000.0);
        assert_eq!(flour.conversion_factor, 1000.0);
        assert_eq!(flour.category, "");
        assert_eq!(flour.supplier, "Supplier A");
        assert!(flour.active);
        assert_eq!(flour.unit_cost(), Some(150.0));
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let good = row(&[("MenuID", "M001"), ("BahanID", "B001"), ("QtyResep", "150")]);
        let bad = row(&[("MenuID", "M001"), ("BahanID", ""), ("QtyResep", "x")]);

        let err = import_recipe_lines(&[good.clone(), bad]).unwrap_err();
        assert_eq!(err.kind, ImportKind::RecipeLines);
        assert_eq!(err.issues.len(), 2);
        assert_eq!(
            err.first_issue().map(ToString::to_string).as_deref(),
            Some("Row 3 BahanID required")
        );

        let lines = import_recipe_lines(&[good]).unwrap();
        assert_eq!(lines, vec![RecipeLine::new("M001", "B001", 150.0)]);
    }

    #[test]
    fn test_import_sales_from_json_rows() {
        let rows = rows_from_json(
            r#"[
                {"Bulan": "2025-03", "Outlet": "Outlet A", "MenuID": "M002", "QtyTerjual": "41"},
                {"Bulan": "2025-03", "Outlet": "Outlet B", "MenuID": "M404", "QtyTerjual": " 3 "}
            ]"#,
        )
        .unwrap();

        let sales = import_sales(&rows).unwrap();
        assert_eq!(sales[0], SalesRecord::new("2025-03", "Outlet A", "M002", 41.0));
        assert_eq!(sales[1].quantity, 3.0);
    }

    #[test]
    fn test_rows_from_json_stringifies_cells() {
        let rows = rows_from_json(
            r#"[{"MenuID": "M001", "BahanID": "B001", "QtyResep": 150, "Catatan": null}]"#,
        )
        .unwrap();

        assert_eq!(rows[0].get("QtyResep").map(String::as_str), Some("150"));
        assert!(!rows[0].contains_key("Catatan"));
        assert!(validate_recipe_rows(&rows).is_empty());

        assert!(rows_from_json(r#"{"MenuID": "M001"}"#).is_err());
    }

    #[test]
    fn test_kind_field_sets() {
        assert_eq!(ImportKind::Ingredients.required_fields().len(), 6);
        assert_eq!(
            ImportKind::RecipeLines.required_fields(),
            &["MenuID", "BahanID", "QtyResep"]
        );
        assert_eq!(
            ImportKind::Sales.required_fields(),
            &["Bulan", "Outlet", "MenuID", "QtyTerjual"]
        );
        assert_eq!(ImportKind::Sales.numeric_fields(), &["QtyTerjual"]);
    }
}
