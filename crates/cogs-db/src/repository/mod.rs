//! # Repository Module
//!
//! One repository per stored entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.ingredients().replace_all(&rows)                           │
//! │       ▼                                                                 │
//! │  IngredientRepository                                                  │
//! │  ├── list(&self)                                                       │
//! │  ├── get(&self, id)                                                    │
//! │  ├── upsert(&self, ingredient)                                         │
//! │  ├── delete(&self, id)                                                 │
//! │  └── replace_all(&self, ingredients)  ← one transaction                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MenuRepository`](menu::MenuRepository) - Menu catalog
//! - [`IngredientRepository`](ingredient::IngredientRepository) - Ingredient master data
//! - [`RecipeRepository`](recipe::RecipeRepository) - Recipe lines keyed by (menu, ingredient)
//! - [`PricingRepository`](pricing::PricingRepository) - Overhead and markup per menu
//! - [`SalesRepository`](sales::SalesRepository) - Append-only sales log

pub mod ingredient;
pub mod menu;
pub mod pricing;
pub mod recipe;
pub mod sales;
