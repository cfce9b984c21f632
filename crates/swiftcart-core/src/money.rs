//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 17.5% coupon on Rs 4,799:                                            │
//! │    4799 * 0.175 = 839.8249999...  → which total do you charge?          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units + basis points                             │
//! │    (4799 × 1750 + 5000) / 10000 = 840, decided once, exactly            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Zero-Decimal Currency
//! The storefront prices everything in whole rupees. `Money` is therefore a
//! count of whole currency units; there is no minor-unit split to manage.
//! The only rounding in the entire engine happens in [`Money::percent_of`],
//! when a percentage coupon lands between two whole units.
//!
//! ## Usage
//! ```rust
//! use swiftcart_core::money::Money;
//!
//! let subtotal = Money::from_units(4000);
//!
//! // Arithmetic operations
//! let with_delivery = subtotal + Money::from_units(800);
//!
//! // Percentage via basis points (2000 bps = 20%)
//! let discount = subtotal.percent_of(2000);
//! assert_eq!(discount.units(), 800);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (the storefront's currency has
/// no minor unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartLine.unit_price ──► line_total ──► subtotal                        │
/// │                                            │                            │
/// │  DeliveryRate.fee ─────────────────────────┤                            │
/// │                                            ▼                            │
/// │  Coupon discount ──────────────────► PricingResult.total                │
/// │                                                                         │
/// │  EVERY monetary value in the engine flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use swiftcart_core::money::Money;
    ///
    /// let fee = Money::from_units(800);
    /// assert_eq!(fee.units(), 800);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes a percentage of this amount, given in basis points,
    /// rounded to the nearest whole unit.
    ///
    /// ## Basis Points
    /// 1 basis point = 0.01% = 1/10000. So 2000 bps = 20%, 1750 bps = 17.5%.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The `+5000` provides
    /// round-to-nearest (5000/10000 = 0.5). i128 intermediate prevents
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use swiftcart_core::money::Money;
    ///
    /// let subtotal = Money::from_units(4000);
    /// assert_eq!(subtotal.percent_of(2000).units(), 800); // 20%
    ///
    /// // Rs 4,799 at 17.5% = 839.825 → rounds to 840
    /// assert_eq!(Money::from_units(4799).percent_of(1750).units(), 840);
    /// ```
    pub fn percent_of(&self, bps: u32) -> Money {
        let amount = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_units(amount as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use swiftcart_core::money::Money;
    ///
    /// let unit_price = Money::from_units(1500);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 4500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the smaller of two Money values.
    ///
    /// Used by the coupon rules to clamp a discount to the subtotal and to
    /// apply a percentage cap.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The storefront formats currency on the
/// frontend to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs {}", sign, self.0.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (cart subtotals).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(4800);
        assert_eq!(money.units(), 4800);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(4800)), "Rs 4800");
        assert_eq!(format!("{}", Money::from_units(-550)), "-Rs 550");
        assert_eq!(format!("{}", Money::from_units(0)), "Rs 0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);
    }

    #[test]
    fn test_percent_of_exact() {
        // 20% of 4000 = 800, no rounding needed
        assert_eq!(Money::from_units(4000).percent_of(2000).units(), 800);
    }

    #[test]
    fn test_percent_of_rounds_to_nearest() {
        // 17.5% of 4799 = 839.825 → 840
        assert_eq!(Money::from_units(4799).percent_of(1750).units(), 840);
        // 10% of 5 = 0.5 → rounds up to 1
        assert_eq!(Money::from_units(5).percent_of(1000).units(), 1);
        // 10% of 4 = 0.4 → rounds down to 0
        assert_eq!(Money::from_units(4).percent_of(1000).units(), 0);
    }

    #[test]
    fn test_percent_of_large_amount_no_overflow() {
        let big = Money::from_units(i64::MAX / 2);
        // Should not panic; i128 intermediate carries it
        let half = big.percent_of(5000);
        assert!(half.units() > 0);
    }

    #[test]
    fn test_min() {
        let a = Money::from_units(100);
        let b = Money::from_units(200);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
        assert_eq!(a.min(a), a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|&u| Money::from_units(u))
            .sum();
        assert_eq!(total.units(), 600);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_units(100);
        assert!(positive.is_positive());

        let negative = Money::from_units(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(1500);
        assert_eq!(unit_price.multiply_quantity(3).units(), 4500);
    }
}
