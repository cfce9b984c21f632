//! # swiftcart-core: Pure Pricing & Coupon Logic for Swiftcart
//!
//! This crate is the **heart** of Swiftcart checkout. It contains the whole
//! pricing computation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Swiftcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront (React)                             │   │
//! │  │    Cart UI ──► Region picker ──► Coupon box ──► Pay button      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              swiftcart-checkout (CheckoutEngine)                │   │
//! │  │        assemble_total, validate_coupon, record_coupon_use       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swiftcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   rates   │  │  coupon   │  │  pricing  │  │   │
//! │  │   │   Money   │  │ RateTable │  │  rules    │  │ assemble  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 swiftcart-db (Coupon store)                     │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Coupon, CartLine, PricingResult)
//! - [`rates`] - Delivery rate table and region resolver
//! - [`coupon`] - Coupon eligibility rules and discount computation
//! - [`pricing`] - Order-total assembly
//! - [`validation`] - Back-office input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same input = same output; even `now` is a parameter
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Whole currency units (i64), basis-point percentages
//! 4. **Explicit Errors**: All outcomes are typed values, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use swiftcart_core::money::Money;
//! use swiftcart_core::pricing::{assemble, AppliedCoupon};
//! use swiftcart_core::rates::{DeliveryRateTable, RegionResolution};
//! use swiftcart_core::types::CartLine;
//!
//! let table = DeliveryRateTable::bundled();
//! let cart = vec![CartLine::new("p-1", "Basmati 5kg", 2000, 2)];
//!
//! if let RegionResolution::Quoted(rate) = table.resolve(Some("lahore")) {
//!     let result = assemble(&cart, &rate, None).unwrap();
//!     assert_eq!(result.total.units(), 4000 + 250);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod rates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use swiftcart_core::Money` instead of
// `use swiftcart_core::money::Money`

pub use error::{PricingError, PricingResultOf, RejectReason, ValidationError};
pub use money::Money;
pub use pricing::AppliedCoupon;
pub use rates::{DeliveryRate, DeliveryRateTable, RegionResolution};
pub use types::*;
