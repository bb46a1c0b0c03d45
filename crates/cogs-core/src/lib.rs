//! # cogs-core: Pure Business Logic for the COGS Suite
//!
//! This crate is the **heart** of the outlet costing workspace. It derives
//! cost of goods sold (HPP), selling price and margin per menu item from
//! ingredient purchase costs and recipes, and it validates imported rows
//! before they become ingredient, recipe or sales data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          COGS Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 cogs-cli (report / sales / import)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cogs-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  costing  │  │  import   │  │ analytics │  │   │
//! │  │   │Ingredient │  │   HPP     │  │ row rules │  │  KPIs     │  │   │
//! │  │   │RecipeLine │  │  margin   │  │  mapping  │  │ breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cogs-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, Menu, RecipeLine, SalesRecord, ...)
//! - [`money`] - Whole-Rupiah display type
//! - [`costing`] - HPP / selling price / margin engine and sales enrichment
//! - [`import`] - Row validation and typed mapping for tabular imports
//! - [`analytics`] - Filtered KPI summaries and breakdowns
//! - [`catalog`] - Fixed menu catalog and seed data
//! - [`validation`] - Field-level business rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cogs_core::catalog;
//! use cogs_core::costing::compute_costing;
//!
//! let report = compute_costing(
//!     &catalog::seed_ingredients(),
//!     &catalog::seed_recipe_lines(),
//!     &catalog::seed_pricing(),
//!     &catalog::seed_menus(),
//! );
//!
//! // Pancake: 150g flour + 200ml milk + 1 egg
//! let pancake = report.get("M001").unwrap();
//! assert!((pancake.raw_cost - 27_700.0).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod catalog;
pub mod costing;
pub mod error;
pub mod import;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use costing::{compute_costing, enrich_sales, CostingReport, CostingResult, EnrichedSale};
pub use error::{CoreError, ImportError, ValidationError};
pub use import::{ImportKind, ImportRow, ValidationIssue};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Offset added to a zero-based data row index when reporting import issues.
///
/// One for the header row, one for 1-based display numbering: the first
/// data row is reported as row 2, matching what a spreadsheet shows.
pub const ROW_NUMBER_OFFSET: usize = 2;

/// Maximum length of an entity code such as `B001` or `M001`.
pub const MAX_CODE_LEN: usize = 50;

/// Maximum length of a display name.
pub const MAX_NAME_LEN: usize = 200;
