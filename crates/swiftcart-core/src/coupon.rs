//! # Coupon Rules Module
//!
//! Pure coupon eligibility and discount computation. The store lookup lives
//! in swiftcart-checkout; this module only decides, it never fetches.
//!
//! ## Rule Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Coupon Evaluation (fixed order, first failure wins)       │
//! │                                                                         │
//! │  normalize_code("  promo20 ") ──► "PROMO20"                             │
//! │       │   (empty after trim ──► MalformedCode)                          │
//! │       ▼                                                                 │
//! │  (store lookup happens here, outside this module)                      │
//! │       ▼                                                                 │
//! │  a. status inactive?        ──► Inactive                               │
//! │  b. expired (status/ts)?    ──► Expired                                │
//! │  c. uses exhausted?         ──► UsesExhausted                          │
//! │  d. subtotal < minimum?     ──► BelowMinimum                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute discount:                                                      │
//! │    percentage: bps of subtotal, then cap, then clamp to subtotal        │
//! │    fixed:      value, clamped to subtotal                               │
//! │                                                                         │
//! │  The delivery fee is NEVER discounted.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `now` is always a parameter, never read from the clock — evaluation is a
//! pure function and tests pick their own time.

use chrono::{DateTime, Utc};

use crate::error::RejectReason;
use crate::money::Money;
use crate::types::{Coupon, CouponStatus, DiscountKind};

/// Result of evaluating one coupon rule set.
pub type CouponOutcome<T> = Result<T, RejectReason>;

// =============================================================================
// Code Normalization
// =============================================================================

/// Normalizes a shopper-typed coupon code: trim whitespace, uppercase.
///
/// Codes are stored uppercase, so normalization is what makes matching
/// case-insensitive. An empty result is `MalformedCode`.
///
/// ## Example
/// ```rust
/// use swiftcart_core::coupon::normalize_code;
///
/// assert_eq!(normalize_code("  promo20 ").unwrap(), "PROMO20");
/// assert!(normalize_code("   ").is_err());
/// ```
pub fn normalize_code(raw: &str) -> CouponOutcome<String> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(RejectReason::MalformedCode);
    }
    Ok(code.to_uppercase())
}

// =============================================================================
// Eligibility
// =============================================================================

/// Checks whether a coupon may be redeemed against `subtotal` at `now`.
///
/// Rules run in a fixed order and the first failure wins — reasons are
/// never combined. A persisted `Expired` status and a passed `expires_at`
/// timestamp land in the same slot, so ordering stays stable whether or not
/// housekeeping got there first.
pub fn check_eligibility(
    coupon: &Coupon,
    subtotal: Money,
    now: DateTime<Utc>,
) -> CouponOutcome<()> {
    if coupon.status == CouponStatus::Inactive {
        return Err(RejectReason::Inactive);
    }

    if coupon.status == CouponStatus::Expired || coupon.expired_at(now) {
        return Err(RejectReason::Expired);
    }

    if coupon.uses_exhausted() {
        return Err(RejectReason::UsesExhausted);
    }

    if subtotal < coupon.min_order() {
        return Err(RejectReason::BelowMinimum);
    }

    Ok(())
}

// =============================================================================
// Discount Computation
// =============================================================================

/// Computes the discount an (eligible) coupon grants on `subtotal`.
///
/// - `Percentage`: bps of subtotal (rounded to the nearest whole unit),
///   then capped by `max_discount` when set
/// - `Fixed`: the flat value
///
/// Either way the result is clamped to the subtotal: a coupon never
/// discounts below zero net merchandise value, and the delivery fee is
/// never discounted.
pub fn compute_discount(coupon: &Coupon, subtotal: Money) -> Money {
    let raw = match coupon.kind {
        DiscountKind::Percentage => {
            let pct = subtotal.percent_of(coupon.value.clamp(0, 10_000) as u32);
            match coupon.max_discount {
                Some(cap) => pct.min(Money::from_units(cap)),
                None => pct,
            }
        }
        DiscountKind::Fixed => Money::from_units(coupon.value.max(0)),
    };

    raw.min(subtotal)
}

/// Full evaluation: eligibility first, then the discount amount.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use swiftcart_core::coupon::evaluate;
/// use swiftcart_core::money::Money;
/// use swiftcart_core::types::{Coupon, CouponStatus, DiscountKind};
///
/// let now = Utc::now();
/// let promo = Coupon {
///     id: "c-1".into(),
///     code: "PROMO20".into(),
///     kind: DiscountKind::Percentage,
///     value: 2000,
///     max_discount: None,
///     min_order_amount: 0,
///     max_uses: None,
///     current_uses: 0,
///     expires_at: None,
///     status: CouponStatus::Active,
///     created_at: now,
///     updated_at: now,
/// };
///
/// let discount = evaluate(&promo, Money::from_units(4000), now).unwrap();
/// assert_eq!(discount.units(), 800);
/// ```
pub fn evaluate(coupon: &Coupon, subtotal: Money, now: DateTime<Utc>) -> CouponOutcome<Money> {
    check_eligibility(coupon, subtotal, now)?;
    Ok(compute_discount(coupon, subtotal))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_coupon() -> Coupon {
        let now = Utc::now();
        Coupon {
            id: "c-1".to_string(),
            code: "PROMO20".to_string(),
            kind: DiscountKind::Percentage,
            value: 2000,
            max_discount: None,
            min_order_amount: 0,
            max_uses: None,
            current_uses: 0,
            expires_at: None,
            status: CouponStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("promo20").unwrap(), "PROMO20");
        assert_eq!(normalize_code("  EiD-2026  ").unwrap(), "EID-2026");
        assert_eq!(normalize_code(""), Err(RejectReason::MalformedCode));
        assert_eq!(normalize_code("   "), Err(RejectReason::MalformedCode));
    }

    #[test]
    fn test_inactive_rejected() {
        let mut c = base_coupon();
        c.status = CouponStatus::Inactive;
        assert_eq!(
            evaluate(&c, Money::from_units(4000), Utc::now()),
            Err(RejectReason::Inactive)
        );
    }

    #[test]
    fn test_expired_by_timestamp() {
        let now = Utc::now();
        let mut c = base_coupon();
        c.expires_at = Some(now - Duration::minutes(1));
        assert_eq!(evaluate(&c, Money::from_units(4000), now), Err(RejectReason::Expired));
    }

    #[test]
    fn test_expired_by_persisted_status() {
        let mut c = base_coupon();
        c.status = CouponStatus::Expired;
        assert_eq!(
            evaluate(&c, Money::from_units(4000), Utc::now()),
            Err(RejectReason::Expired)
        );
    }

    #[test]
    fn test_expiry_checked_before_uses_and_minimum() {
        // A coupon that is expired AND exhausted AND below minimum must
        // report Expired — first failure wins.
        let now = Utc::now();
        let mut c = base_coupon();
        c.expires_at = Some(now - Duration::hours(1));
        c.max_uses = Some(1);
        c.current_uses = 1;
        c.min_order_amount = 10_000;

        assert_eq!(evaluate(&c, Money::from_units(300), now), Err(RejectReason::Expired));
    }

    #[test]
    fn test_uses_exhausted_even_if_otherwise_valid() {
        let mut c = base_coupon();
        c.max_uses = Some(50);
        c.current_uses = 50;
        assert_eq!(
            evaluate(&c, Money::from_units(4000), Utc::now()),
            Err(RejectReason::UsesExhausted)
        );
    }

    #[test]
    fn test_below_minimum_order() {
        let mut c = base_coupon();
        c.min_order_amount = 500;
        assert_eq!(
            evaluate(&c, Money::from_units(300), Utc::now()),
            Err(RejectReason::BelowMinimum)
        );
        // At exactly the minimum the coupon applies
        assert!(evaluate(&c, Money::from_units(500), Utc::now()).is_ok());
    }

    #[test]
    fn test_percentage_discount_no_cap() {
        // PROMO20: 20% of 4000 = 800
        let c = base_coupon();
        assert_eq!(
            evaluate(&c, Money::from_units(4000), Utc::now()).unwrap().units(),
            800
        );
    }

    #[test]
    fn test_percentage_discount_with_cap() {
        let mut c = base_coupon();
        c.max_discount = Some(500);
        // 20% of 4000 = 800, capped to 500
        assert_eq!(compute_discount(&c, Money::from_units(4000)).units(), 500);
        // 20% of 1000 = 200, under the cap
        assert_eq!(compute_discount(&c, Money::from_units(1000)).units(), 200);
    }

    #[test]
    fn test_percentage_bounds_property() {
        let mut c = base_coupon();
        c.max_discount = Some(700);
        for subtotal in [1, 37, 500, 4000, 99_999] {
            let s = Money::from_units(subtotal);
            let d = compute_discount(&c, s);
            assert!(d >= Money::zero());
            assert!(d <= s);
            assert!(d <= Money::from_units(700));
        }
    }

    #[test]
    fn test_fixed_discount_is_min_of_value_and_subtotal() {
        let mut c = base_coupon();
        c.kind = DiscountKind::Fixed;

        c.value = 500;
        assert_eq!(compute_discount(&c, Money::from_units(4000)).units(), 500);

        // Fixed 15000 against subtotal 10000: clamp to the subtotal, so the
        // merchandise portion is fully discounted and delivery still charges
        c.value = 15_000;
        assert_eq!(compute_discount(&c, Money::from_units(10_000)).units(), 10_000);
    }
}
