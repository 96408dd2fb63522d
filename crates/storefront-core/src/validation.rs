//! # Validation Module
//!
//! Input validation for listing parameters and cart quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  ├── Widget constraints (slider bounds, picker ranges)                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Query model (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: parameter rules before a catalog request is built    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog service                                              │
//! │  └── Whatever the third party enforces                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart reducer itself never calls into this module: invalid cart
//! arguments are no-ops, not errors. [`validate_quantity`] exists for
//! presentation code that wants to reject input before dispatching.
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_category_slug, validate_page_limit};
//!
//! validate_category_slug("mens-shirts").unwrap();
//! validate_page_limit(12).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_PAGE_SIZE, MAX_RATING, MAX_SEARCH_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates free-text search input.
///
/// ## Rules
/// - Can be empty (no search)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed search text.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_search_text;
///
/// assert_eq!(validate_search_text("  phone ").unwrap(), "phone");
/// assert!(validate_search_text(&"a".repeat(101)).is_err());
/// ```
pub fn validate_search_text(text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(text.to_string())
}

/// Validates a category slug.
///
/// ## Rules
/// - Must not be empty
/// - Lowercase ASCII letters, digits and hyphens only
/// - Must not start or end with a hyphen
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_category_slug;
///
/// assert!(validate_category_slug("home-decoration").is_ok());
/// assert!(validate_category_slug("Home Decor").is_err());
/// assert!(validate_category_slug("-tops").is_err());
/// ```
pub fn validate_category_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if slug.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 50,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        || slug.starts_with('-')
        || slug.ends_with('-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "category".to_string(),
            reason: "must contain only lowercase letters, digits, and inner hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a page size.
///
/// ## Rules
/// - Between 1 and MAX_PAGE_SIZE (100)
pub fn validate_page_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: i64::from(MAX_PAGE_SIZE),
        });
    }

    Ok(())
}

/// Validates a minimum-rating filter value.
///
/// ## Rules
/// - Finite
/// - Between 0 and MAX_RATING (5)
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: MAX_RATING as i64,
        });
    }

    Ok(())
}

/// Validates a price range filter.
///
/// ## Rules
/// - Neither bound is negative
/// - `min <= max`
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price_range;
///
/// assert!(validate_price_range(Money::zero(), Money::from_cents(5000)).is_ok());
/// assert!(validate_price_range(Money::from_cents(5000), Money::zero()).is_err());
/// ```
pub fn validate_price_range(min: Money, max: Money) -> ValidationResult<()> {
    if min.is_negative() || max.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if min > max {
        return Err(ValidationError::InvertedRange {
            field: "price".to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity entered for a cart line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: quantity picker                                                  │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → Error: "quantity must be positive"              │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       └── OK → dispatch SetQuantity                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_slug() {
        assert!(validate_category_slug("smartphones").is_ok());
        assert!(validate_category_slug("mens-shirts").is_ok());
        assert!(validate_category_slug("top10").is_ok());

        assert!(validate_category_slug("").is_err());
        assert!(validate_category_slug("   ").is_err());
        assert!(validate_category_slug("Mens-Shirts").is_err());
        assert!(validate_category_slug("mens shirts").is_err());
        assert!(validate_category_slug("tops-").is_err());
        assert!(validate_category_slug("../admin").is_err());
    }

    #[test]
    fn test_validate_search_text() {
        assert_eq!(validate_search_text("").unwrap(), "");
        assert_eq!(validate_search_text(" laptop ").unwrap(), "laptop");
        assert!(validate_search_text(&"é".repeat(100)).is_ok());
        assert!(validate_search_text(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_page_limit() {
        assert!(validate_page_limit(1).is_ok());
        assert!(validate_page_limit(100).is_ok());
        assert!(validate_page_limit(0).is_err());
        assert!(validate_page_limit(101).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        let ten = Money::from_cents(1000);
        assert!(validate_price_range(ten, ten).is_ok());
        assert!(validate_price_range(Money::from_cents(-1), ten).is_err());

        let err = validate_price_range(ten, Money::zero()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                field: "price".to_string(),
                min: "$10.00".to_string(),
                max: "$0.00".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }
}
