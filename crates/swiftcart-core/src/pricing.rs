//! # Pricing Module
//!
//! Pure order-total assembly: subtotal + delivery fee - discount.
//!
//! The impure half of checkout (region resolution against a live table and
//! the coupon lookup) lives in swiftcart-checkout's `CheckoutEngine`; once
//! those inputs are in hand, everything here is plain arithmetic over
//! integers. Line totals, the subtotal, and the final total are exact sums;
//! the only rounding in the engine already happened inside the percentage
//! discount.
//!
//! ## Checkout Pricing Lifecycle
//! ```text
//! Empty ──► RegionPending ──► Priced ──► (CouponApplied | CouponRejected)
//!                                │                    │
//!                                └──── recompute ◄────┘
//!                                         │
//!                                         ▼
//!                                     Submitted (terminal for this engine)
//! ```
//! There is no state held here to make that machine go — any change to the
//! cart, region, or code simply recomputes from the latest inputs. Same
//! inputs, same `PricingResult`, every time.

use crate::error::{PricingError, PricingResultOf};
use crate::money::Money;
use crate::rates::DeliveryRate;
use crate::types::{CartLine, PricingResult};

// =============================================================================
// Subtotal
// =============================================================================

/// Sums the cart's line totals.
///
/// Rejects an empty cart, and a cart whose lines sum to a non-positive
/// amount (all-zero prices leave nothing to sell).
///
/// Order of lines does not matter — integer addition commutes.
pub fn subtotal(lines: &[CartLine]) -> PricingResultOf<Money> {
    if lines.is_empty() {
        return Err(PricingError::EmptyCart);
    }

    let sum: Money = lines.iter().map(CartLine::line_total).sum();
    if !sum.is_positive() {
        return Err(PricingError::EmptyCart);
    }

    Ok(sum)
}

// =============================================================================
// Assembly
// =============================================================================

/// A validated coupon's contribution, ready to subtract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    /// Normalized coupon code, recorded on the order breakdown.
    pub code: String,
    /// Discount amount, already capped and clamped by the coupon rules.
    pub amount: Money,
}

/// Assembles the final breakdown from the cart, a resolved delivery rate,
/// and an optional validated coupon.
///
/// ## Invariants
/// - `total = subtotal + delivery_fee - discount`
/// - the coupon rules clamp `discount <= subtotal`, so `total >=
///   delivery_fee` always holds
///
/// The assembler trusts `applied` to have come from
/// [`crate::coupon::evaluate`] — it does not re-validate, and it never
/// partially applies a discount.
pub fn assemble(
    lines: &[CartLine],
    rate: &DeliveryRate,
    applied: Option<AppliedCoupon>,
) -> PricingResultOf<PricingResult> {
    let subtotal = subtotal(lines)?;
    let delivery_fee = rate.fee();

    let (discount, coupon_code) = match applied {
        Some(coupon) => (coupon.amount, Some(coupon.code)),
        None => (Money::zero(), None),
    };

    Ok(PricingResult {
        subtotal,
        delivery_fee,
        delivery_eta: rate.eta.clone(),
        discount,
        coupon_code,
        total: subtotal + delivery_fee - discount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(fee: i64) -> DeliveryRate {
        DeliveryRate {
            fee,
            eta: "2-3 days".to_string(),
        }
    }

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine::new("p-1", "Basmati 5kg", 1500, 2),
            CartLine::new("p-2", "Ghee 1kg", 1000, 1),
        ]
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        assert_eq!(subtotal(&lines()).unwrap().units(), 4000);
    }

    #[test]
    fn test_subtotal_rejects_empty_cart() {
        assert_eq!(subtotal(&[]), Err(PricingError::EmptyCart));
    }

    #[test]
    fn test_subtotal_rejects_worthless_cart() {
        let free = vec![CartLine::new("p-1", "Flyer", 0, 3)];
        assert_eq!(subtotal(&free), Err(PricingError::EmptyCart));
    }

    #[test]
    fn test_subtotal_is_commutative() {
        let mut reversed = lines();
        reversed.reverse();
        assert_eq!(subtotal(&lines()).unwrap(), subtotal(&reversed).unwrap());
    }

    #[test]
    fn test_assemble_without_coupon() {
        // Scenario: subtotal 4000, fee 800, no coupon → total 4800
        let result = assemble(&lines(), &rate(800), None).unwrap();
        assert_eq!(result.subtotal.units(), 4000);
        assert_eq!(result.delivery_fee.units(), 800);
        assert_eq!(result.discount.units(), 0);
        assert_eq!(result.coupon_code, None);
        assert_eq!(result.total.units(), 4800);
        assert_eq!(result.delivery_eta, "2-3 days");
    }

    #[test]
    fn test_assemble_with_coupon() {
        // Scenario: subtotal 4000, fee 800, PROMO20 at 20% → 4000+800-800
        let applied = AppliedCoupon {
            code: "PROMO20".to_string(),
            amount: Money::from_units(800),
        };
        let result = assemble(&lines(), &rate(800), Some(applied)).unwrap();
        assert_eq!(result.discount.units(), 800);
        assert_eq!(result.coupon_code.as_deref(), Some("PROMO20"));
        assert_eq!(result.total.units(), 4000);
    }

    #[test]
    fn test_assemble_total_never_below_delivery_fee() {
        // Merchandise fully discounted: total collapses to exactly the fee
        let cart = vec![CartLine::new("p-1", "TV", 10_000, 1)];
        let applied = AppliedCoupon {
            code: "MEGA".to_string(),
            amount: Money::from_units(10_000),
        };
        let result = assemble(&cart, &rate(800), Some(applied)).unwrap();
        assert_eq!(result.total, result.delivery_fee);
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let applied = AppliedCoupon {
            code: "PROMO20".to_string(),
            amount: Money::from_units(800),
        };
        let a = assemble(&lines(), &rate(800), Some(applied.clone())).unwrap();
        let b = assemble(&lines(), &rate(800), Some(applied)).unwrap();
        assert_eq!(a, b);
    }
}
