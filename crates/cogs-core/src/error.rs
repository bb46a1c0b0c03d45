//! # Error Types
//!
//! Domain-specific error types for cogs-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cogs-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Field rule violations on a single record       │
//! │  └── ImportError      - Tabular import rejected (all-or-nothing)       │
//! │                                                                         │
//! │  cogs-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CLI (anyhow)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that an individual [`ValidationIssue`] is *data*, not an error: the
//! import validators return a list of them. Only when a caller decides to
//! reject an import does the list become an [`ImportError`].

use thiserror::Error;

use crate::import::{ImportKind, ValidationIssue};
use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The acting role may not modify master data.
    ///
    /// ## When This Occurs
    /// - A `viewer` tries to add/delete ingredients or recipe lines
    /// - A `viewer` tries to import or export data
    #[error("Role {role} is not allowed to edit data")]
    Forbidden { role: Role },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Import rejected (wraps ImportError).
    #[error(transparent)]
    Import(#[from] ImportError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record-level validation errors.
///
/// Raised before a record is written to storage.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., unknown role name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Import Error
// =============================================================================

/// A tabular import was rejected.
///
/// Carries every issue found; the message names only the first one, which
/// is what the operator sees:
///
/// ```text
/// Ingredients import rejected: Row 2 HargaBeli must be numeric (3 issues)
/// ```
#[derive(Debug, Error)]
#[error("{kind} import rejected: {}", first_issue_summary(.issues))]
pub struct ImportError {
    pub kind: ImportKind,
    pub issues: Vec<ValidationIssue>,
}

impl ImportError {
    /// Returns the first issue, the one surfaced to the user.
    pub fn first_issue(&self) -> Option<&ValidationIssue> {
        self.issues.first()
    }
}

fn first_issue_summary(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => "no issues recorded".to_string(),
        [only] => only.to_string(),
        [first, ..] => format!("{} ({} issues)", first, issues.len()),
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::MustBePositive {
            field: "conversion_factor".to_string(),
        };
        assert_eq!(err.to_string(), "conversion_factor must be positive");
    }

    #[test]
    fn test_import_error_names_first_issue() {
        let err = ImportError {
            kind: ImportKind::Ingredients,
            issues: vec![
                ValidationIssue::numeric(0, "HargaBeli"),
                ValidationIssue::required(1, "NamaBahan"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Ingredients import rejected: Row 2 HargaBeli must be numeric (2 issues)"
        );
        assert_eq!(err.first_issue().map(|i| i.row_number), Some(2));
    }

    #[test]
    fn test_forbidden_message() {
        let err = CoreError::Forbidden { role: Role::Viewer };
        assert_eq!(err.to_string(), "Role viewer is not allowed to edit data");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "menu_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
