//! # Validation Module
//!
//! Input validation for back-office coupon management and cart payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront/admin frontend                                    │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database constraints (NOT NULL, UNIQUE, CHECK)               │
//! │                                                                         │
//! │  Defense in depth: each layer catches what the one above missed        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout-time coupon rejection is NOT handled here — that is
//! [`crate::coupon`] territory with its own [`crate::error::RejectReason`].
//! This module guards what admins store, so that what checkout reads is
//! already well-formed.

use crate::error::ValidationError;
use crate::types::DiscountKind;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum coupon code length.
pub const MAX_CODE_LEN: usize = 32;

/// Maximum quantity of a single cart line.
///
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon code as entered by an admin.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 32 characters
/// - Only letters, digits, hyphens, and underscores
///
/// ## Example
/// ```rust
/// use swiftcart_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("PROMO20").is_ok());
/// assert!(validate_coupon_code("EID-2026").is_ok());
/// assert!(validate_coupon_code("").is_err());
/// assert!(validate_coupon_code("HAS SPACE").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount value against its kind.
///
/// ## Rules
/// - `Percentage`: basis points in (0, 10000] — a 0% coupon is meaningless
///   and >100% would invert the order
/// - `Fixed`: non-negative amount
pub fn validate_discount_value(kind: DiscountKind, value: i64) -> ValidationResult<()> {
    match kind {
        DiscountKind::Percentage => {
            if value <= 0 || value > 10_000 {
                return Err(ValidationError::OutOfRange {
                    field: "value".to_string(),
                    min: 1,
                    max: 10_000,
                });
            }
        }
        DiscountKind::Fixed => {
            if value < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "value".to_string(),
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
    }

    Ok(())
}

/// Validates a discount cap.
///
/// Must be positive to mean anything; a zero cap would nullify the coupon.
pub fn validate_max_discount(cap: i64) -> ValidationResult<()> {
    if cap <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_discount".to_string(),
        });
    }

    Ok(())
}

/// Validates a minimum order amount. Zero means "no minimum" and is fine.
pub fn validate_min_order_amount(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::OutOfRange {
            field: "min_order_amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a redemption limit.
pub fn validate_max_uses(max_uses: i64) -> ValidationResult<()> {
    if max_uses <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_uses".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart line quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items); negative is not.
pub fn validate_unit_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
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
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("PROMO20").is_ok());
        assert!(validate_coupon_code("eid_2026").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("HAS SPACE").is_err());
        assert!(validate_coupon_code(&"A".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_discount_value_percentage() {
        assert!(validate_discount_value(DiscountKind::Percentage, 2000).is_ok());
        assert!(validate_discount_value(DiscountKind::Percentage, 10_000).is_ok());

        assert!(validate_discount_value(DiscountKind::Percentage, 0).is_err());
        assert!(validate_discount_value(DiscountKind::Percentage, -5).is_err());
        assert!(validate_discount_value(DiscountKind::Percentage, 10_001).is_err());
    }

    #[test]
    fn test_validate_discount_value_fixed() {
        assert!(validate_discount_value(DiscountKind::Fixed, 0).is_ok());
        assert!(validate_discount_value(DiscountKind::Fixed, 15_000).is_ok());
        assert!(validate_discount_value(DiscountKind::Fixed, -1).is_err());
    }

    #[test]
    fn test_validate_max_discount() {
        assert!(validate_max_discount(500).is_ok());
        assert!(validate_max_discount(0).is_err());
        assert!(validate_max_discount(-1).is_err());
    }

    #[test]
    fn test_validate_min_order_amount() {
        assert!(validate_min_order_amount(0).is_ok());
        assert!(validate_min_order_amount(500).is_ok());
        assert!(validate_min_order_amount(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0).is_ok());
        assert!(validate_unit_price(1500).is_ok());
        assert!(validate_unit_price(-100).is_err());
    }
}
