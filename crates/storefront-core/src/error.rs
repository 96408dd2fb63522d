//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                              │
//! │  └── StoreError       - Persistence failures (never leave the store)   │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - "Failed to fetch" for the presentation layer   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → UI message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Cart mutations never produce errors: they are total

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted cart record violates the cart invariants.
    ///
    /// ## When This Occurs
    /// - A line has quantity 0 (lines with no quantity must not exist)
    ///
    /// Duplicate product ids are reported as [`CoreError::DuplicateLine`].
    /// The store treats both exactly like a missing record.
    #[error("Inconsistent cart record: {reason}")]
    InconsistentCart { reason: String },

    /// Duplicate line for one product in a persisted record.
    #[error("Cart record contains product {0} more than once")]
    DuplicateLine(ProductId),

    /// Sort key string is not one of the supported keys.
    #[error("Unknown sort key: '{0}'. Valid options: price, rating")]
    UnknownSortKey(String),

    /// Sort order string is not `asc` or `desc`.
    #[error("Unknown sort order: '{0}'. Valid options: asc, desc")]
    UnknownSortOrder(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied query parameters don't meet
/// requirements. Used for early validation before a catalog request is sent.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., slug with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Lower bound is above the upper bound.
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange { field: String, min: String, max: String },
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
    fn test_error_messages() {
        let err = CoreError::UnknownSortKey("name".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown sort key: 'name'. Valid options: price, rating"
        );

        let err = CoreError::DuplicateLine(ProductId::new(7));
        assert_eq!(err.to_string(), "Cart record contains product 7 more than once");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "category".to_string(),
        };
        assert_eq!(err.to_string(), "category is required");

        let err = ValidationError::InvertedRange {
            field: "price".to_string(),
            min: "$20.00".to_string(),
            max: "$10.00".to_string(),
        };
        assert_eq!(err.to_string(), "price range is inverted: $20.00 > $10.00");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "limit".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
