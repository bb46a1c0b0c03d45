//! # Costing Engine
//!
//! Derives raw ingredient cost, HPP, selling price and margin for every menu
//! in the catalog, and prices sales records with the result.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per menu m:                                                            │
//! │                                                                         │
//! │  raw_cost        = Σ unit_cost(ingredient) × line.quantity              │
//! │                    over recipe lines of m whose ingredient resolves     │
//! │  overhead_amount = raw_cost × overhead                                  │
//! │  hpp             = raw_cost + overhead_amount                           │
//! │  selling_price   = hpp × (1 + markup)                                   │
//! │  margin_amount   = selling_price − hpp                                  │
//! │  margin_fraction = margin_amount / selling_price   (0 if price is 0)   │
//! │                                                                         │
//! │  Worked example (Pancake, flour only):                                 │
//! │    150000 / 1000 = 150 per gram × 150 g      = 22 500                  │
//! │    overhead 10%                               =  2 250                  │
//! │    hpp                                        = 24 750                  │
//! │    markup 60%  → selling price                = 39 600                  │
//! │    margin 14 850 / 39 600                     = 0.375                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unresolved Recipe Lines
//! A recipe line whose ingredient id is unknown, or whose ingredient has no
//! usable conversion factor, contributes 0 to its menu and raises no error.
//! The skipped lines are returned in [`CostingReport::unresolved`] so that a
//! caller with a logger can surface them.
//!
//! Both operations are pure: no input is mutated and no state is kept
//! between calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Ingredient, Menu, PricingTable, RecipeLine, SalesRecord};

// =============================================================================
// Costing Result
// =============================================================================

/// Cost and price figures for one menu item.
///
/// Derived on demand, never a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostingResult {
    pub menu_id: String,
    pub name: String,
    /// Sum of ingredient costs for one serving.
    pub raw_cost: f64,
    pub overhead_fraction: f64,
    pub overhead_amount: f64,
    /// Cost basis including overhead.
    pub hpp: f64,
    pub markup_fraction: f64,
    pub selling_price: f64,
    pub margin_amount: f64,
    /// Share of the selling price that is profit; 0 when the price is 0.
    pub margin_fraction: f64,
}

/// Why a recipe line contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No ingredient with this id.
    UnknownIngredient,
    /// The ingredient's conversion factor is not a positive number.
    InvalidConversionFactor,
}

/// A recipe line left out of a menu's raw cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnresolvedLine {
    pub menu_id: String,
    pub ingredient_id: String,
    pub reason: SkipReason,
}

/// Output of [`compute_costing`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostingReport {
    /// One row per catalog menu, in catalog order.
    pub results: Vec<CostingResult>,
    /// Same rows keyed by menu id.
    pub by_menu_id: HashMap<String, CostingResult>,
    /// Recipe lines skipped while accumulating raw cost.
    pub unresolved: Vec<UnresolvedLine>,
}

impl CostingReport {
    /// Looks up the result for one menu.
    #[inline]
    pub fn get(&self, menu_id: &str) -> Option<&CostingResult> {
        self.by_menu_id.get(menu_id)
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Computes cost and price figures for every menu in `menus`.
///
/// ## Arguments
/// * `ingredients` - Ingredient master data; on duplicate ids the last wins
/// * `recipe_lines` - Lines may reference unknown ingredients or menus
/// * `pricing` - Per-menu overhead/markup; absent entries mean 0 / 0
/// * `menus` - Catalog that decides which rows are produced, and in what order
///
/// Runs in O(|ingredients| + |recipe_lines| + |menus|).
pub fn compute_costing(
    ingredients: &[Ingredient],
    recipe_lines: &[RecipeLine],
    pricing: &PricingTable,
    menus: &[Menu],
) -> CostingReport {
    let index: HashMap<&str, &Ingredient> = ingredients
        .iter()
        .map(|ingredient| (ingredient.id.as_str(), ingredient))
        .collect();

    let mut raw_costs: HashMap<&str, f64> = HashMap::new();
    let mut unresolved = Vec::new();

    for line in recipe_lines {
        let unit_cost = match index.get(line.ingredient_id.as_str()) {
            None => Err(SkipReason::UnknownIngredient),
            Some(ingredient) => ingredient
                .unit_cost()
                .ok_or(SkipReason::InvalidConversionFactor),
        };

        match unit_cost {
            Ok(unit_cost) => {
                *raw_costs.entry(line.menu_id.as_str()).or_insert(0.0) +=
                    unit_cost * line.quantity;
            }
            Err(reason) => unresolved.push(UnresolvedLine {
                menu_id: line.menu_id.clone(),
                ingredient_id: line.ingredient_id.clone(),
                reason,
            }),
        }
    }

    let results: Vec<CostingResult> = menus
        .iter()
        .map(|menu| {
            let raw_cost = raw_costs.get(menu.id.as_str()).copied().unwrap_or(0.0);
            let params = pricing.get(&menu.id).copied().unwrap_or_default();
            price_menu(menu, raw_cost, params.overhead, params.markup)
        })
        .collect();

    let by_menu_id = results
        .iter()
        .map(|result| (result.menu_id.clone(), result.clone()))
        .collect();

    CostingReport {
        results,
        by_menu_id,
        unresolved,
    }
}

fn price_menu(menu: &Menu, raw_cost: f64, overhead: f64, markup: f64) -> CostingResult {
    let overhead_amount = raw_cost * overhead;
    let hpp = raw_cost + overhead_amount;
    let selling_price = hpp * (1.0 + markup);
    let margin_amount = selling_price - hpp;
    let margin_fraction = if selling_price == 0.0 {
        0.0
    } else {
        margin_amount / selling_price
    };

    CostingResult {
        menu_id: menu.id.clone(),
        name: menu.name.clone(),
        raw_cost,
        overhead_fraction: overhead,
        overhead_amount,
        hpp,
        markup_fraction: markup,
        selling_price,
        margin_amount,
        margin_fraction,
    }
}

// =============================================================================
// Sales Enrichment
// =============================================================================

/// A sales record priced with the current costing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EnrichedSale {
    pub period: String,
    pub outlet: String,
    pub menu_id: String,
    pub quantity: f64,
    pub selling_price: f64,
    pub hpp: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub gross_profit: f64,
}

/// Prices each sales record with its menu's selling price and HPP.
///
/// A record whose menu id has no costing result is priced at 0 rather than
/// rejected, so unknown menus show up as zero-valued rows.
pub fn enrich_sales(
    sales: &[SalesRecord],
    by_menu_id: &HashMap<String, CostingResult>,
) -> Vec<EnrichedSale> {
    sales
        .iter()
        .map(|record| {
            let (selling_price, hpp) = by_menu_id
                .get(&record.menu_id)
                .map(|result| (result.selling_price, result.hpp))
                .unwrap_or((0.0, 0.0));
            let total_revenue = record.quantity * selling_price;
            let total_cost = record.quantity * hpp;

            EnrichedSale {
                period: record.period.clone(),
                outlet: record.outlet.clone(),
                menu_id: record.menu_id.clone(),
                quantity: record.quantity,
                selling_price,
                hpp,
                total_revenue,
                total_cost,
                gross_profit: total_revenue - total_cost,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
