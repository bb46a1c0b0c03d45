//! # Domain Types
//!
//! Core domain types used throughout the COGS suite.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Ingredient    │   │   RecipeLine    │   │      Menu       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (B001)      │◄──│  ingredient_id  │   │  id (M001)      │       │
//! │  │  purchase_price │   │  menu_id        │──►│  name           │       │
//! │  │  conversion     │   │  quantity       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘            ▲                │
//! │                                                        │                │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                │
//! │  │ PricingParams   │   │  SalesRecord    │────────────┘                │
//! │  │  overhead       │   │  period, outlet │                             │
//! │  │  markup         │   │  quantity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entities are keyed by human-readable business codes (`B001`, `M001`).
//! A recipe line is keyed by the pair `(menu_id, ingredient_id)`. Sales
//! records have no identity beyond their contents (append-only log).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::{
    validate_code, validate_conversion_factor, validate_fraction, validate_label,
    validate_name, validate_purchase_price, validate_quantity, ValidationResult,
};

// =============================================================================
// Ingredient (Bahan)
// =============================================================================

/// A raw material bought in purchase units and consumed in small units.
///
/// ## Unit Conversion
/// ```text
/// Tepung Terigu: 1 kg = 1000 gram, bought at Rp 150.000 per kg
///
/// unit_cost = purchase_price / conversion_factor
///           = 150000 / 1000
///           = Rp 150 per gram
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Ingredient {
    /// Business code (e.g. `B001`), unique.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form grouping ("Bahan Kering", "Susu", ...).
    pub category: String,

    /// Unit the ingredient is bought in (kg, liter, tray).
    pub purchase_unit: String,

    /// Price of one purchase unit.
    pub purchase_price: f64,

    /// Small units per purchase unit (1 kg = 1000 gram). Must be > 0.
    pub conversion_factor: f64,

    /// Unit recipes are written in (gram, ml, butir).
    pub small_unit: String,

    /// Supplier name.
    pub supplier: String,

    /// Whether the ingredient is still in use.
    pub active: bool,
}

impl Ingredient {
    /// Cost of one small unit.
    ///
    /// Returns `None` when the conversion factor is not a positive finite
    /// number, so callers can never divide by zero.
    pub fn unit_cost(&self) -> Option<f64> {
        if self.conversion_factor.is_finite() && self.conversion_factor > 0.0 {
            Some(self.purchase_price / self.conversion_factor)
        } else {
            None
        }
    }

    /// Checks the record-level invariants before it is stored.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_code("id", &self.id)?;
        validate_name("name", &self.name)?;
        validate_purchase_price(self.purchase_price)?;
        validate_conversion_factor(self.conversion_factor)?;
        Ok(())
    }
}

// =============================================================================
// Menu
// =============================================================================

/// A menu item in the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Menu {
    pub id: String,
    pub name: String,
}

impl Menu {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Menu {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Recipe Line (Resep)
// =============================================================================

/// One ingredient consumed by one menu item.
///
/// The pair `(menu_id, ingredient_id)` is unique. The ingredient reference
/// is *not* guaranteed to resolve; costing skips lines that don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RecipeLine {
    pub menu_id: String,
    pub ingredient_id: String,
    /// Small units consumed per serving.
    pub quantity: f64,
}

impl RecipeLine {
    pub fn new(menu_id: impl Into<String>, ingredient_id: impl Into<String>, quantity: f64) -> Self {
        RecipeLine {
            menu_id: menu_id.into(),
            ingredient_id: ingredient_id.into(),
            quantity,
        }
    }

    /// Checks the record-level invariants before it is stored.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_code("menu_id", &self.menu_id)?;
        validate_code("ingredient_id", &self.ingredient_id)?;
        validate_quantity("quantity", self.quantity)?;
        Ok(())
    }
}

// =============================================================================
// Pricing Parameters
// =============================================================================

/// Overhead and markup fractions for one menu item.
///
/// `0.10` means 10%. A menu without an entry uses the default of 0 / 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingParams {
    /// Share of raw ingredient cost added to reach HPP.
    pub overhead: f64,
    /// Share of HPP added to reach the selling price.
    pub markup: f64,
}

impl PricingParams {
    pub const fn new(overhead: f64, markup: f64) -> Self {
        PricingParams { overhead, markup }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_fraction("overhead", self.overhead)?;
        validate_fraction("markup", self.markup)?;
        Ok(())
    }
}

/// Pricing parameters keyed by menu id.
pub type PricingTable = HashMap<String, PricingParams>;

// =============================================================================
// Sales Record (Penjualan)
// =============================================================================

/// Quantity of one menu item sold at one outlet in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SalesRecord {
    /// Period label, e.g. `2025-03`.
    pub period: String,
    pub outlet: String,
    pub menu_id: String,
    pub quantity: f64,
}

impl SalesRecord {
    pub fn new(
        period: impl Into<String>,
        outlet: impl Into<String>,
        menu_id: impl Into<String>,
        quantity: f64,
    ) -> Self {
        SalesRecord {
            period: period.into(),
            outlet: outlet.into(),
            menu_id: menu_id.into(),
            quantity,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_label("period", &self.period)?;
        validate_label("outlet", &self.outlet)?;
        validate_code("menu_id", &self.menu_id)?;
        validate_quantity("quantity", self.quantity)?;
        Ok(())
    }
}

// =============================================================================
// Role
// =============================================================================

/// What a signed-in user may do.
///
/// Viewers see dashboards and reports; only admins edit master data,
/// import files and export sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Viewer,
    Admin,
}

impl Role {
    #[inline]
    pub const fn can_edit(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Fails with [`CoreError::Forbidden`] unless the role may edit.
    pub fn ensure_can_edit(&self) -> CoreResult<()> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(CoreError::Forbidden { role: *self })
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}', expected viewer or admin", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
