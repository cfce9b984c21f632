//! # swiftcart-db: Coupon Store for Swiftcart
//!
//! This crate is the SQLite-backed coupon store of record. It holds the
//! connection pool, embedded migrations, and the coupon repository that
//! checkout and the back office share.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Swiftcart Data Flow                               │
//! │                                                                         │
//! │  CheckoutEngine (validate_coupon / record_coupon_use)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   swiftcart-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (coupon.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CouponRepo    │    │ 001_coupons  │  │   │
//! │  │   │ WAL + FK      │    │               │    │     .sql     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │               data/swiftcart.db (or :memory:)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (coupon)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swiftcart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/swiftcart.db")).await?;
//!
//! let coupon = db.coupons().find_by_code("PROMO20").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::coupon::{BulkStatusOutcome, CouponRepository, FailedUpdate, NewCoupon};
