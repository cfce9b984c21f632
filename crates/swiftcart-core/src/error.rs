//! # Error Types
//!
//! Domain-specific error types for swiftcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swiftcart-core errors (this file)                                     │
//! │  ├── PricingError     - Why a checkout could not be priced             │
//! │  ├── RejectReason     - Why a coupon was refused (business rule)       │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  swiftcart-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  swiftcart-checkout errors                                             │
//! │  └── StoreError       - Transient coupon-store failure                 │
//! │                                                                         │
//! │  Flow: RejectReason → PricingError → storefront API → shopper          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant is a recoverable-by-the-shopper condition, never fatal
//! 3. Errors are enum variants, never String
//! 4. A transient store failure is `LookupFailed`, NOT `NotFound` — the
//!    shopper gets "try again", not "bad coupon"

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Coupon Reject Reason
// =============================================================================

/// Why a coupon was refused.
///
/// These are business-rule outcomes, evaluated in a fixed order by
/// [`crate::coupon::check_eligibility`]. The first failing rule wins;
/// reasons are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Code was empty after trimming, or otherwise unusable as a code.
    #[error("coupon code is malformed")]
    MalformedCode,

    /// No coupon exists under the normalized code.
    #[error("coupon code not found")]
    NotFound,

    /// Coupon exists but an admin has switched it off.
    #[error("coupon is inactive")]
    Inactive,

    /// Coupon expiry timestamp has passed (or it was stored as expired).
    #[error("coupon has expired")]
    Expired,

    /// `current_uses` has reached `max_uses`.
    #[error("coupon has no uses left")]
    UsesExhausted,

    /// Order subtotal is below the coupon's minimum order amount.
    #[error("order subtotal is below the coupon minimum")]
    BelowMinimum,
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Why a checkout could not be priced.
///
/// ## When Each Occurs
/// ```text
/// EmptyCart            Cart has no lines, or subtotal <= 0
/// RegionRequired       Shopper has not picked a delivery region yet
/// UndeliverableRegion  Region picked, but we do not deliver there
/// CouponRejected       Coupon code failed a business rule (see reason)
/// LookupFailed         Coupon store was unreachable — retry, coupon may
///                      well be fine
/// ```
///
/// The assembler never partially applies a coupon: an invalid code surfaces
/// as `CouponRejected` and the caller decides whether to retry without it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PricingError {
    /// Cart is empty or its subtotal is not positive.
    #[error("cart is empty")]
    EmptyCart,

    /// No delivery region has been selected yet.
    #[error("a delivery region is required")]
    RegionRequired,

    /// The selected region is not serviced (unknown, or zero fee configured).
    #[error("region '{0}' is not serviced")]
    UndeliverableRegion(String),

    /// The supplied coupon code was refused; the reason says why.
    #[error("coupon rejected: {0}")]
    CouponRejected(RejectReason),

    /// The coupon store could not be reached. Infrastructure trouble, not a
    /// business outcome — offer the shopper a retry.
    #[error("coupon lookup failed: {0}")]
    LookupFailed(String),
}

impl PricingError {
    /// True for the one infrastructure failure; everything else is a
    /// business outcome the shopper can resolve themselves.
    pub fn is_transient(&self) -> bool {
        matches!(self, PricingError::LookupFailed(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Admin input validation errors.
///
/// These occur when back-office input (coupon definitions, cart payloads)
/// doesn't meet requirements. Used for early validation before anything is
/// persisted.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., bad characters in a coupon code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResultOf<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
