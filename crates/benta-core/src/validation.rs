//! # Validation Module
//!
//! Business rule validation, run by the engine before any database work.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: API layer (excluded)    - shape checks, deserialization
//! Layer 2: THIS MODULE             - business rule validation
//! Layer 3: Database (SQLite)       - NOT NULL / FK / CHECK constraints
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed [`MAX_LINE_QUANTITY`]
///
/// ```rust
/// use benta_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-3).is_err());
/// assert!(validate_quantity(1_000).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a snapshot unit price. Zero is allowed (freebies and
/// promo items exist); negative prices are not.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price_at_sale".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale total. Like unit prices, zero is allowed.
pub fn validate_sale_total(total: Money) -> ValidationResult<()> {
    if total.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "total_amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (product or customer).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters (storage column width)
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}
