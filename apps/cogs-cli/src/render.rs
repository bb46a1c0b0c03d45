//! Plain-text rendering for terminal output. Amounts are shown in whole
//! Rupiah via [`Money`]; fractions as percentages.

use std::fmt::Write;

use cogs_core::costing::SkipReason;
use cogs_core::{CostingReport, Money};

use crate::commands::SalesDashboard;

/// `0.375` → `37.5%`
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn rupiah(amount: f64) -> String {
    Money::from_amount(amount).to_string()
}

fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::UnknownIngredient => "unknown ingredient",
        SkipReason::InvalidConversionFactor => "conversion factor is not positive",
    }
}

/// One row per menu, then any recipe lines costing had to skip.
pub fn costing_table(report: &CostingReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{:<6} {:<22} {:>12} {:>12} {:>12} {:>12} {:>7}",
        "MENU", "NAME", "RAW COST", "HPP", "PRICE", "MARGIN", "MARGIN%"
    );
    for row in &report.results {
        let _ = writeln!(
            out,
            "{:<6} {:<22} {:>12} {:>12} {:>12} {:>12} {:>7}",
            row.menu_id,
            row.name,
            rupiah(row.raw_cost),
            rupiah(row.hpp),
            rupiah(row.selling_price),
            rupiah(row.margin_amount),
            percent(row.margin_fraction),
        );
    }

    if !report.unresolved.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Skipped recipe lines:");
        for line in &report.unresolved {
            let _ = writeln!(
                out,
                "  {} uses {}: {}",
                line.menu_id,
                line.ingredient_id,
                skip_reason(line.reason)
            );
        }
    }

    out.trim_end().to_string()
}

/// KPIs followed by the three breakdowns.
pub fn sales_dashboard(dashboard: &SalesDashboard) -> String {
    let mut out = String::new();
    let filter = &dashboard.filter;

    let _ = writeln!(
        out,
        "Outlet: {}   Period: {}   Records: {}",
        filter.outlet.as_deref().unwrap_or("All"),
        filter.period.as_deref().unwrap_or("All"),
        dashboard.records
    );
    let _ = writeln!(out);

    let summary = &dashboard.summary;
    let _ = writeln!(out, "{:<14} {:>16}", "Total sales", rupiah(summary.total_revenue));
    let _ = writeln!(out, "{:<14} {:>16}", "Total HPP", rupiah(summary.total_cost));
    let _ = writeln!(out, "{:<14} {:>16}", "Gross profit", rupiah(summary.gross_profit));
    let _ = writeln!(out, "{:<14} {:>16}", "Margin", percent(summary.margin_fraction));

    let _ = writeln!(out);
    let _ = writeln!(out, "Sales by outlet");
    for (outlet, revenue) in &dashboard.revenue_by_outlet {
        let _ = writeln!(out, "  {:<12} {:>16}", outlet, rupiah(*revenue));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Margin by period");
    for (period, margin) in &dashboard.margin_by_period {
        let _ = writeln!(out, "  {:<12} {:>16}", period, percent(*margin));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Sales by menu");
    for (menu_id, revenue) in &dashboard.revenue_by_menu {
        let _ = writeln!(out, "  {:<12} {:>16}", menu_id, rupiah(*revenue));
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogs_core::catalog::{seed_ingredients, seed_menus, seed_pricing, seed_recipe_lines};
    use cogs_core::{compute_costing, RecipeLine};

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.375), "37.5%");
        assert_eq!(percent(0.0), "0.0%");
    }

    #[test]
    fn test_costing_table_shows_rupiah_and_skips() {
        let mut lines = seed_recipe_lines();
        lines.push(RecipeLine::new("M002", "B999", 5.0));
        let report = compute_costing(&seed_ingredients(), &lines, &seed_pricing(), &seed_menus());

        let table = costing_table(&report);
        let pancake = table.lines().find(|l| l.starts_with("M001")).unwrap();
        assert!(pancake.contains("Rp 27.700"));
        assert!(pancake.contains("Rp 48.752"));
        assert!(pancake.contains("37.5%"));
        assert!(table.contains("M002 uses B999: unknown ingredient"));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let table = costing_table(&CostingReport::default());
        assert_eq!(table.lines().count(), 1);
        assert!(table.starts_with("MENU"));
    }
}
