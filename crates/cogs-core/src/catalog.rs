//! # Catalog and Seed Data
//!
//! The fixed menu catalog plus the starter data a fresh outlet chain is
//! set up with: ten ingredients, seventeen recipe lines, default pricing,
//! five outlets and a year of generated sales.

use chrono::NaiveDate;

use crate::types::{Ingredient, Menu, PricingParams, PricingTable, RecipeLine, SalesRecord};

/// Overhead applied to every seeded menu (10%).
pub const DEFAULT_OVERHEAD: f64 = 0.10;

/// Markup applied to every seeded menu (60%).
pub const DEFAULT_MARKUP: f64 = 0.60;

/// Outlets of the chain.
pub const OUTLETS: [&str; 5] = ["Outlet A", "Outlet B", "Outlet C", "Outlet D", "Outlet E"];

/// Year the seed sales are generated for.
pub const SEED_YEAR: i32 = 2025;

const MENUS: [(&str, &str); 8] = [
    ("M001", "Pancake Original"),
    ("M002", "Coffee Latte"),
    ("M003", "Cheese Toast"),
    ("M004", "Chocolate Cake"),
    ("M005", "Fried Egg"),
    ("M006", "Chocolate Drink"),
    ("M007", "Butter Croissant"),
    ("M008", "Spaghetti Bolognese"),
];

// id, name, category, purchase unit, price, conversion, small unit, supplier
const INGREDIENTS: [(&str, &str, &str, &str, f64, f64, &str, &str); 10] = [
    ("B001", "Tepung Terigu", "Bahan Kering", "kg", 150_000.0, 1000.0, "gram", "Supplier A"),
    ("B002", "Gula Pasir", "Bahan Kering", "kg", 120_000.0, 1000.0, "gram", "Supplier A"),
    ("B003", "Susu Cair", "Susu", "liter", 20_000.0, 1000.0, "ml", "Supplier B"),
    ("B004", "Telur", "Protein", "tray", 36_000.0, 30.0, "butir", "Supplier C"),
    ("B005", "Mentega", "Lemak", "kg", 90_000.0, 1000.0, "gram", "Supplier A"),
    ("B006", "Keju", "Dairy", "kg", 180_000.0, 1000.0, "gram", "Supplier B"),
    ("B007", "Coklat Bubuk", "Bahan Kering", "kg", 220_000.0, 1000.0, "gram", "Supplier D"),
    ("B008", "Air", "Lainnya", "liter", 5_000.0, 1000.0, "ml", "Supplier Local"),
    ("B009", "Ragi", "Bahan Kering", "pack", 5_000.0, 10.0, "gram", "Supplier E"),
    ("B010", "Garam", "Bumbu", "kg", 8_000.0, 1000.0, "gram", "Supplier F"),
];

const RECIPE_LINES: [(&str, &str, f64); 17] = [
    ("M001", "B001", 150.0),
    ("M001", "B003", 200.0),
    ("M001", "B004", 1.0),
    ("M002", "B003", 150.0),
    ("M002", "B008", 30.0),
    ("M003", "B005", 10.0),
    ("M003", "B006", 30.0),
    ("M004", "B001", 200.0),
    ("M004", "B007", 50.0),
    ("M005", "B004", 2.0),
    ("M006", "B007", 25.0),
    ("M006", "B003", 150.0),
    ("M007", "B001", 120.0),
    ("M007", "B005", 15.0),
    ("M008", "B001", 100.0),
    ("M008", "B010", 5.0),
    ("M008", "B004", 1.0),
];

/// The fixed menu catalog, in display order.
pub fn seed_menus() -> Vec<Menu> {
    MENUS.iter().map(|(id, name)| Menu::new(*id, *name)).collect()
}

pub fn seed_ingredients() -> Vec<Ingredient> {
    INGREDIENTS
        .iter()
        .map(
            |(id, name, category, unit, price, factor, small_unit, supplier)| Ingredient {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                purchase_unit: unit.to_string(),
                purchase_price: *price,
                conversion_factor: *factor,
                small_unit: small_unit.to_string(),
                supplier: supplier.to_string(),
                active: true,
            },
        )
        .collect()
}

pub fn seed_recipe_lines() -> Vec<RecipeLine> {
    RECIPE_LINES
        .iter()
        .map(|(menu_id, ingredient_id, qty)| RecipeLine::new(*menu_id, *ingredient_id, *qty))
        .collect()
}

/// Default overhead and markup for every catalog menu.
pub fn seed_pricing() -> PricingTable {
    MENUS
        .iter()
        .map(|(id, _)| {
            (
                id.to_string(),
                PricingParams::new(DEFAULT_OVERHEAD, DEFAULT_MARKUP),
            )
        })
        .collect()
}

/// The twelve monthly period labels of `year` (`2025-01` … `2025-12`).
pub fn months(year: i32) -> Vec<String> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|date| date.format("%Y-%m").to_string())
        .collect()
}

/// Generates one sales record per (period, outlet, menu) of `year`.
///
/// Quantities are deterministic (20..=59), so repeated seeding produces the
/// same data.
pub fn seed_sales(year: i32) -> Vec<SalesRecord> {
    let periods = months(year);
    let mut sales = Vec::with_capacity(periods.len() * OUTLETS.len() * MENUS.len());

    for (p, period) in periods.iter().enumerate() {
        for (o, outlet) in OUTLETS.iter().enumerate() {
            for (m, (menu_id, _)) in MENUS.iter().enumerate() {
                let qty = 20 + (p * 7 + o * 13 + m * 5) % 40;
                sales.push(SalesRecord::new(period.clone(), *outlet, *menu_id, qty as f64));
            }
        }
    }

    sales
}

// =============================================================================
// Unit Tests
// =============================================================================
