//! # swiftcart-checkout: Checkout Orchestration for Swiftcart
//!
//! Thin orchestration over `swiftcart-core` (the rules) and a coupon store
//! (the data). This is the crate a storefront backend embeds.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Swiftcart Checkout Flow                           │
//! │                                                                         │
//! │  Storefront backend                                                    │
//! │       │  price_order / validate_coupon / record_coupon_use             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               swiftcart-checkout (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐        ┌─────────────────────────┐   │   │
//! │  │   │   CheckoutEngine   │───────►│   CouponStore (trait)   │   │   │
//! │  │   │    (engine.rs)     │        │       (store.rs)        │   │   │
//! │  │   └─────────┬──────────┘        └───────────┬─────────────┘   │   │
//! │  │             │                               │                  │   │
//! │  └─────────────┼───────────────────────────────┼──────────────────┘   │
//! │                ▼                               ▼                       │
//! │        swiftcart-core                   swiftcart-db                   │
//! │      (pure pricing rules)           (SqliteCouponStore)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swiftcart_checkout::{CheckoutEngine, SqliteCouponStore};
//! use swiftcart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/swiftcart.db")).await?;
//! let engine = CheckoutEngine::with_bundled_rates(SqliteCouponStore::new(db.coupons()));
//!
//! let breakdown = engine
//!     .price_order(&cart_lines, Some("lahore"), Some("PROMO20"))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CheckoutEngine, ValidatedCoupon};
pub use store::{CouponStore, InMemoryCouponStore, SqliteCouponStore, StoreError, StoreResult};
