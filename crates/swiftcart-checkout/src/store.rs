//! # Coupon Store Seam
//!
//! The engine never talks to SQLite directly; it goes through the
//! [`CouponStore`] trait. That keeps the engine testable against an
//! in-memory double and lets a deployment swap the store of record
//! without touching pricing logic.
//!
//! Two outcomes are deliberately kept apart at this seam:
//! - `Ok(None)` — the store answered and no such coupon exists
//! - `Err(StoreError)` — the store could not answer at all

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use swiftcart_core::Coupon;
use swiftcart_db::{CouponRepository, DbError};

// =============================================================================
// Store Error
// =============================================================================

/// The store failed to answer: connectivity, timeout, corrupt row.
///
/// Never used for "coupon not found" — that is `Ok(None)` from the lookup.
#[derive(Debug, Error)]
#[error("coupon store unavailable: {reason}")]
pub struct StoreError {
    pub reason: String,
}

impl StoreError {
    pub fn new(reason: impl Into<String>) -> Self {
        StoreError {
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// CouponStore Trait
// =============================================================================

/// Read/record access to the coupon store of record.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Looks up a coupon by its normalized (uppercase, trimmed) code.
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>>;

    /// Records one redemption against the coupon.
    async fn increment_use(&self, coupon_id: &str) -> StoreResult<()>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

/// Production store backed by the SQLite coupon repository.
#[derive(Debug, Clone)]
pub struct SqliteCouponStore {
    repo: CouponRepository,
}

impl SqliteCouponStore {
    pub fn new(repo: CouponRepository) -> Self {
        SqliteCouponStore { repo }
    }
}

#[async_trait]
impl CouponStore for SqliteCouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        self.repo
            .find_by_code(code)
            .await
            .map_err(|e| StoreError::new(e.to_string()))
    }

    async fn increment_use(&self, coupon_id: &str) -> StoreResult<()> {
        // A vanished row at redemption time is a store-side surprise,
        // not a checkout rejection, so NotFound maps here too.
        self.repo
            .increment_use(coupon_id)
            .await
            .map_err(|e: DbError| StoreError::new(e.to_string()))
    }
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory store for tests and demos. `set_failing(true)` makes every
/// call return [`StoreError`], simulating an outage.
#[derive(Debug, Default)]
pub struct InMemoryCouponStore {
    coupons: Mutex<HashMap<String, Coupon>>,
    failing: AtomicBool,
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a coupon, keyed by its code.
    pub fn add(&self, coupon: Coupon) {
        let mut coupons = self.coupons.lock().unwrap();
        coupons.insert(coupon.code.clone(), coupon);
    }

    /// Toggles outage simulation.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current use count for a coupon, by ID.
    pub fn uses(&self, coupon_id: &str) -> Option<i64> {
        let coupons = self.coupons.lock().unwrap();
        coupons
            .values()
            .find(|c| c.id == coupon_id)
            .map(|c| c.current_uses)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::new("simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl CouponStore for InMemoryCouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        self.check_available()?;
        let coupons = self.coupons.lock().unwrap();
        debug!(code = %code, "In-memory coupon lookup");
        Ok(coupons.get(code).cloned())
    }

    async fn increment_use(&self, coupon_id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut coupons = self.coupons.lock().unwrap();
        let coupon = coupons
            .values_mut()
            .find(|c| c.id == coupon_id)
            .ok_or_else(|| StoreError::new(format!("no coupon with id {coupon_id}")))?;
        coupon.current_uses += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
