//! # Domain Types
//!
//! Core domain types for the Swiftcart checkout engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Coupon      │   │    CartLine     │   │  PricingResult  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  product_id     │   │  subtotal       │       │
//! │  │  code (upper)   │   │  name snapshot  │   │  delivery_fee   │       │
//! │  │  kind/value     │   │  unit_price     │   │  discount       │       │
//! │  │  min/max/uses   │   │  quantity       │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  CouponStatus   │   │  DiscountKind   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Active         │   │  Percentage     │                             │
//! │  │  Inactive       │   │  Fixed          │                             │
//! │  │  Expired        │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Coupon` is the only type here with a backing store of record; the
//! engine treats it as read-mostly, with a single post-order increment
//! delegated to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Coupon Status
// =============================================================================

/// Lifecycle status of a coupon.
///
/// `Expired` may be persisted eagerly by back-office housekeeping, but the
/// engine also derives expiry from `expires_at` at evaluation time — a
/// stale `Active` row past its expiry is still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    /// Coupon is redeemable (subject to the other rules).
    Active,
    /// An admin has switched the coupon off.
    Inactive,
    /// Coupon has passed its expiry or exhausted its uses.
    Expired,
}

impl Default for CouponStatus {
    fn default() -> Self {
        CouponStatus::Active
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// How a coupon's `value` field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the subtotal, in basis points
    /// (2000 = 20%). May be capped by `max_discount`.
    Percentage,
    /// `value` is a flat amount in currency units.
    Fixed,
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount code, as stored by the coupon store of record.
///
/// ## Invariants (enforced at admin creation, assumed here)
/// - `code` is stored uppercase; matching is case-insensitive via
///   normalization at the lookup boundary
/// - `value` is basis points in (0, 10000] for `Percentage`, a non-negative
///   amount for `Fixed`
/// - `max_discount` is only meaningful for `Percentage`
/// - `current_uses >= 0`, starts at 0, incremented exactly once per
///   successfully placed order that redeemed this coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Coupon {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The code shoppers type, stored uppercase.
    pub code: String,

    /// How `value` is interpreted.
    pub kind: DiscountKind,

    /// Basis points for `Percentage` (2000 = 20%), currency units for
    /// `Fixed`.
    pub value: i64,

    /// Cap on the computed discount. Percentage coupons only.
    pub max_discount: Option<i64>,

    /// Minimum order subtotal required to redeem. 0 = no minimum.
    pub min_order_amount: i64,

    /// Maximum number of redemptions, if limited.
    pub max_uses: Option<i64>,

    /// Redemptions so far.
    pub current_uses: i64,

    /// When the coupon stops being redeemable, if ever.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Lifecycle status.
    pub status: CouponStatus,

    /// When the coupon was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the coupon was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// Returns the minimum order amount as Money.
    #[inline]
    pub fn min_order(&self) -> Money {
        Money::from_units(self.min_order_amount)
    }

    /// Checks whether the redemption limit has been reached.
    pub fn uses_exhausted(&self) -> bool {
        match self.max_uses {
            Some(max) => self.current_uses >= max,
            None => false,
        }
    }

    /// Checks whether the coupon is past its expiry at `now`.
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => expiry <= now,
            None => false,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopper's cart.
///
/// Uses the snapshot pattern: price and name are frozen copies taken when
/// the line entered the cart, so pricing stays consistent even if the
/// product record changes mid-checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen, for the order breakdown).
    pub name: String,

    /// Unit price in currency units at time of adding (frozen).
    pub unit_price: i64,

    /// Quantity ordered. Always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: i64, quantity: i64) -> Self {
        CartLine {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line total = unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_units(self.unit_price).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The computed checkout breakdown. Ephemeral — recomputed from the latest
/// inputs on every change, persisted only as part of the order it priced.
///
/// ## Invariants
/// - `total = subtotal + delivery_fee - discount`
/// - `discount <= subtotal`, therefore `total >= delivery_fee`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    /// Sum of line totals before delivery and discount.
    pub subtotal: Money,

    /// Flat delivery fee for the selected region.
    pub delivery_fee: Money,

    /// Estimated delivery label for the selected region, verbatim from the
    /// rate table (shown next to the total in the storefront).
    pub delivery_eta: String,

    /// Amount subtracted thanks to the applied coupon. Zero when no coupon.
    pub discount: Money,

    /// Normalized code of the applied coupon, if any.
    pub coupon_code: Option<String>,

    /// The payable total.
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
