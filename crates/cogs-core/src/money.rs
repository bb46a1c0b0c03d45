//! # Money Module
//!
//! Whole-Rupiah amounts for display and export.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Costing works in f64: unit costs are fractional                       │
//! │    Gula Pasir: 120000 / 1000 = Rp 120 per gram                         │
//! │    Ragi:         5000 /   10 = Rp 500 per gram                         │
//! │    Telur:       36000 /   30 = Rp 1200 per butir                       │
//! │                                                                         │
//! │  Reports show whole Rupiah:                                            │
//! │    39600.000000000004 ──► Money::from_amount ──► "Rp 39.600"           │
//! │                                                                         │
//! │  Rupiah has no minor unit in practice, so rounding happens exactly     │
//! │  once, at the edge, never inside the engine.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cogs_core::money::Money;
//!
//! let price = Money::from_amount(39_600.4);
//! assert_eq!(price.rupiah(), 39_600);
//! assert_eq!(price.to_string(), "Rp 39.600");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Rupiah, for display and export only.
///
/// ## Design Decisions
/// - **i64 (signed)**: gross profit can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - Built from engine output with [`Money::from_amount`] (round half away
///   from zero); non-finite inputs map to zero
/// - No arithmetic: sums are taken in f64 and rounded once
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Rounds a computed amount to whole Rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use cogs_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(2_249.5).rupiah(), 2_250);
    /// assert_eq!(Money::from_amount(-0.5).rupiah(), -1);
    /// assert_eq!(Money::from_amount(f64::NAN).rupiah(), 0);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // `as` saturates at i64 bounds
        Money(amount.round() as i64)
    }

    /// Returns the value in whole Rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Indonesian formatting: `Rp 1.234.567`, `-Rp 1.500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::zero().to_string(), "Rp 0");
        assert_eq!(Money::from_amount(150.0).to_string(), "Rp 150");
        assert_eq!(Money::from_amount(1_500.0).to_string(), "Rp 1.500");
        assert_eq!(Money::from_amount(150_000.0).to_string(), "Rp 150.000");
        assert_eq!(Money::from_amount(1_234_567.0).to_string(), "Rp 1.234.567");
        assert_eq!(Money::from_amount(-1_500.0).to_string(), "-Rp 1.500");
    }

    #[test]
    fn test_from_amount_rounds_half_away_from_zero() {
        assert_eq!(Money::from_amount(39_600.000_000_004).rupiah(), 39_600);
        assert_eq!(Money::from_amount(0.5).rupiah(), 1);
        assert_eq!(Money::from_amount(1.49).rupiah(), 1);
        assert_eq!(Money::from_amount(-2.5).rupiah(), -3);
    }

    #[test]
    fn test_from_amount_non_finite_is_zero() {
        assert!(Money::from_amount(f64::NAN).is_zero());
        assert!(Money::from_amount(f64::INFINITY).is_zero());
        assert!(!Money::from_amount(1.0).is_zero());
    }
}
