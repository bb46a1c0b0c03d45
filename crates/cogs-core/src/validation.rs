//! # Validation Module
//!
//! Record-level business rules, checked before a record is written.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Import rows (import.rs)                                      │
//! │  ├── Required columns present and non-empty                            │
//! │  └── Numeric columns parse as numbers                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Typed records (THIS MODULE)                                  │
//! │  ├── Codes and names non-empty, bounded length                         │
//! │  └── Prices ≥ 0, conversion factor > 0, numbers finite                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── PRIMARY KEY / composite key uniqueness                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cogs_core::validation::{validate_code, validate_conversion_factor};
//!
//! assert!(validate_code("id", "B001").is_ok());
//! assert!(validate_conversion_factor(0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_CODE_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a business code (`B001`, `M001`).
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 50 characters
/// - No whitespace inside the code
pub fn validate_code(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_label(field, value)?;

    if value.trim().len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a free-text label that only has to be present (outlet, period).
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn ensure_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a purchase price.
///
/// ## Rules
/// - Finite
/// - Zero is allowed (donated or sample stock)
/// - Must not be negative
pub fn validate_purchase_price(price: f64) -> ValidationResult<()> {
    ensure_finite("purchase_price", price)?;

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "purchase_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a conversion factor (small units per purchase unit).
///
/// ## Rules
/// - Finite and strictly positive, otherwise the unit cost is undefined
///
/// ```text
/// unit_cost = purchase_price / conversion_factor
///                              ^^^^^^^^^^^^^^^^^ never 0
/// ```
pub fn validate_conversion_factor(factor: f64) -> ValidationResult<()> {
    ensure_finite("conversion_factor", factor)?;

    if factor <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "conversion_factor".to_string(),
        });
    }

    Ok(())
}

/// Validates a recipe or sales quantity.
///
/// Only finiteness is enforced. Negative quantities are accepted
/// numerically (corrections are entered that way).
pub fn validate_quantity(field: &str, quantity: f64) -> ValidationResult<()> {
    ensure_finite(field, quantity)
}

/// Validates an overhead or markup fraction (`0.10` = 10%).
///
/// ## Rules
/// - Finite
/// - Must not be negative
pub fn validate_fraction(field: &str, fraction: f64) -> ValidationResult<()> {
    ensure_finite(field, fraction)?;

    if fraction < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
