//! # Sales Analytics
//!
//! KPI summaries and breakdowns over enriched sales, as shown on the
//! dashboard: total sales, total HPP, gross profit, margin, and sales per
//! outlet / margin per period / sales per menu.
//!
//! ```text
//! enrich_sales ──► SalesFilter::apply ──► summarize
//!                                    ├──► revenue_by_outlet
//!                                    ├──► margin_by_period
//!                                    └──► revenue_by_menu
//! ```
//!
//! Breakdown keys come back sorted (`BTreeMap`), so period labels such as
//! `2025-01 … 2025-12` are already chronological.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::costing::EnrichedSale;

// =============================================================================
// Filter
// =============================================================================

/// Restricts sales to one outlet and/or one period. `None` matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesFilter {
    pub outlet: Option<String>,
    pub period: Option<String>,
}

impl SalesFilter {
    pub fn new(outlet: Option<String>, period: Option<String>) -> Self {
        // An empty selection means "all", same as no selection.
        SalesFilter {
            outlet: outlet.filter(|o| !o.is_empty()),
            period: period.filter(|p| !p.is_empty()),
        }
    }

    pub fn matches(&self, sale: &EnrichedSale) -> bool {
        self.outlet.as_deref().map_or(true, |o| sale.outlet == o)
            && self.period.as_deref().map_or(true, |p| sale.period == p)
    }

    pub fn apply<'a>(&self, sales: &'a [EnrichedSale]) -> Vec<&'a EnrichedSale> {
        sales.iter().filter(|sale| self.matches(sale)).collect()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Totals over a set of enriched sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
    /// Gross profit over revenue; 0 when there is no revenue.
    pub margin_fraction: f64,
}

fn margin(revenue: f64, profit: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        profit / revenue
    }
}

pub fn summarize<'a, I>(sales: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a EnrichedSale>,
{
    let mut summary = SalesSummary::default();
    for sale in sales {
        summary.total_revenue += sale.total_revenue;
        summary.total_cost += sale.total_cost;
        summary.gross_profit += sale.gross_profit;
    }
    summary.margin_fraction = margin(summary.total_revenue, summary.gross_profit);
    summary
}

// =============================================================================
// Breakdowns
// =============================================================================

/// Revenue per outlet.
pub fn revenue_by_outlet<'a, I>(sales: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a EnrichedSale>,
{
    let mut totals = BTreeMap::new();
    for sale in sales {
        *totals.entry(sale.outlet.clone()).or_insert(0.0) += sale.total_revenue;
    }
    totals
}

/// Margin fraction per period, from that period's revenue and profit.
pub fn margin_by_period<'a, I>(sales: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a EnrichedSale>,
{
    let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for sale in sales {
        let entry = totals.entry(sale.period.clone()).or_insert((0.0, 0.0));
        entry.0 += sale.total_revenue;
        entry.1 += sale.gross_profit;
    }
    totals
        .into_iter()
        .map(|(period, (revenue, profit))| (period, margin(revenue, profit)))
        .collect()
}

/// Revenue per menu id.
pub fn revenue_by_menu<'a, I>(sales: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a EnrichedSale>,
{
    let mut totals = BTreeMap::new();
    for sale in sales {
        *totals.entry(sale.menu_id.clone()).or_insert(0.0) += sale.total_revenue;
    }
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(period: &str, outlet: &str, menu_id: &str, revenue: f64, cost: f64) -> EnrichedSale {
        EnrichedSale {
            period: period.to_string(),
            outlet: outlet.to_string(),
            menu_id: menu_id.to_string(),
            quantity: 1.0,
            selling_price: revenue,
            hpp: cost,
            total_revenue: revenue,
            total_cost: cost,
            gross_profit: revenue - cost,
        }
    }

    fn sample() -> Vec<EnrichedSale> {
        vec![
            sale("2025-01", "Outlet A", "M001", 1000.0, 600.0),
            sale("2025-01", "Outlet B", "M002", 500.0, 400.0),
            sale("2025-02", "Outlet A", "M001", 2000.0, 1500.0),
        ]
    }

    #[test]
    fn test_filter_by_outlet_and_period() {
        let sales = sample();

        let all = SalesFilter::default().apply(&sales);
        assert_eq!(all.len(), 3);

        let outlet_a = SalesFilter::new(Some("Outlet A".to_string()), None).apply(&sales);
        assert_eq!(outlet_a.len(), 2);

        let jan_a = SalesFilter::new(Some("Outlet A".to_string()), Some("2025-01".to_string()))
            .apply(&sales);
        assert_eq!(jan_a.len(), 1);

        let empty_means_all = SalesFilter::new(Some(String::new()), Some(String::new()));
        assert_eq!(empty_means_all, SalesFilter::default());
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_revenue, 3500.0);
        assert_eq!(summary.total_cost, 2500.0);
        assert_eq!(summary.gross_profit, 1000.0);
        assert!((summary.margin_fraction - 1000.0 / 3500.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_empty_has_zero_margin() {
        let summary = summarize(&Vec::<EnrichedSale>::new());
        assert_eq!(summary, SalesSummary::default());
        assert!(!summary.margin_fraction.is_nan());
    }

    #[test]
    fn test_breakdowns() {
        let sales = sample();

        let by_outlet = revenue_by_outlet(&sales);
        assert_eq!(by_outlet.get("Outlet A"), Some(&3000.0));
        assert_eq!(by_outlet.get("Outlet B"), Some(&500.0));

        let by_period = margin_by_period(&sales);
        let periods: Vec<&String> = by_period.keys().collect();
        assert_eq!(periods, vec!["2025-01", "2025-02"]);
        assert!((by_period["2025-01"] - 500.0 / 1500.0).abs() < 1e-12);
        assert!((by_period["2025-02"] - 0.25).abs() < 1e-12);

        let by_menu = revenue_by_menu(SalesFilter::new(None, Some("2025-01".into())).apply(&sales));
        assert_eq!(by_menu.len(), 2);
        assert_eq!(by_menu["M002"], 500.0);
    }
}
