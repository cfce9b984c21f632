//! # Coupon Repository
//!
//! Database operations for coupons.
//!
//! ## Coupon Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coupon Lifecycle                                   │
//! │                                                                         │
//! │  1. ADMIN CREATES                                                      │
//! │     └── insert(NewCoupon) → Coupon { status: Active, current_uses: 0 } │
//! │                                                                         │
//! │  2. CHECKOUT READS                                                     │
//! │     └── find_by_code() — single read per validation                    │
//! │                                                                         │
//! │  3. ORDER PLACED                                                       │
//! │     └── increment_use() — once per order that redeemed the code        │
//! │                                                                         │
//! │  4. ADMIN MANAGES                                                      │
//! │     └── update_status() / update_status_many() / delete()              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use swiftcart_core::validation::{
    validate_coupon_code, validate_discount_value, validate_max_discount,
    validate_max_uses, validate_min_order_amount,
};
use swiftcart_core::{Coupon, CouponStatus, DiscountKind, ValidationError};

// =============================================================================
// Payloads
// =============================================================================

/// Payload for creating a coupon from the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCoupon {
    pub code: String,
    pub kind: DiscountKind,
    /// Basis points for `Percentage`, currency units for `Fixed`.
    pub value: i64,
    pub max_discount: Option<i64>,
    pub min_order_amount: i64,
    pub max_uses: Option<i64>,
    pub expires_at: Option<chrono::DateTime<Utc>>,
}

impl NewCoupon {
    /// Validates the payload against the admin input rules.
    ///
    /// Callers run this before [`CouponRepository::insert`]; the repository
    /// itself only persists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_coupon_code(&self.code)?;
        validate_discount_value(self.kind, self.value)?;
        if let Some(cap) = self.max_discount {
            validate_max_discount(cap)?;
        }
        validate_min_order_amount(self.min_order_amount)?;
        if let Some(max) = self.max_uses {
            validate_max_uses(max)?;
        }
        Ok(())
    }
}

/// Outcome of a bulk status update: which rows made it, which did not and
/// why. Partial failure is reported, never swallowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkStatusOutcome {
    /// IDs whose status was updated.
    pub succeeded: Vec<String>,
    /// IDs that failed, with the error message for each.
    pub failed: Vec<FailedUpdate>,
}

/// One failed row in a bulk update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedUpdate {
    pub id: String,
    pub error: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for coupon database operations.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

const COUPON_COLUMNS: &str = "id, code, kind, value, max_discount, min_order_amount, \
     max_uses, current_uses, expires_at, status, created_at, updated_at";

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Inserts a new coupon. The code is stored uppercase so that checkout
    /// lookups against the normalized form always hit.
    pub async fn insert(&self, new: &NewCoupon) -> DbResult<Coupon> {
        let now = Utc::now();
        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            code: new.code.trim().to_uppercase(),
            kind: new.kind,
            value: new.value,
            max_discount: new.max_discount,
            min_order_amount: new.min_order_amount,
            max_uses: new.max_uses,
            current_uses: 0,
            expires_at: new.expires_at,
            status: CouponStatus::Active,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %coupon.id, code = %coupon.code, "Inserting coupon");

        sqlx::query(
            r#"
            INSERT INTO coupons (
                id, code, kind, value, max_discount, min_order_amount,
                max_uses, current_uses, expires_at, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&coupon.id)
        .bind(&coupon.code)
        .bind(coupon.kind)
        .bind(coupon.value)
        .bind(coupon.max_discount)
        .bind(coupon.min_order_amount)
        .bind(coupon.max_uses)
        .bind(coupon.current_uses)
        .bind(coupon.expires_at)
        .bind(coupon.status)
        .bind(coupon.created_at)
        .bind(coupon.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Looks up a coupon by its (already normalized) code.
    ///
    /// This is the checkout validation read: exactly one query. `Ok(None)`
    /// means "no such coupon" — a business outcome, not an error.
    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Gets a coupon by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Lists all coupons, newest first (back-office table view).
    pub async fn list(&self) -> DbResult<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    /// Counts all coupons.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Records one redemption: `current_uses += 1`.
    ///
    /// The increment itself is atomic (single UPDATE), but checkout
    /// validates before the order is placed, so two concurrent checkouts
    /// can both pass validation and push a limited coupon past `max_uses`.
    /// That over-redemption is an accepted trade-off; the counter is usage
    /// accounting, the order itself is never corrupted. A stricter store
    /// would add `AND (max_uses IS NULL OR current_uses < max_uses)` and
    /// surface the miss.
    pub async fn increment_use(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE coupons SET
                current_uses = current_uses + 1,
                updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        debug!(id = %id, "Recorded coupon use");
        Ok(())
    }

    /// Updates a coupon's status.
    pub async fn update_status(&self, id: &str, status: CouponStatus) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE coupons SET
                status = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    /// Updates the status of many coupons, reporting per-row outcomes.
    ///
    /// Rows are updated independently; one missing ID does not roll back
    /// the rest. The outcome says exactly which IDs succeeded and which
    /// failed with what error.
    pub async fn update_status_many(
        &self,
        ids: &[String],
        status: CouponStatus,
    ) -> BulkStatusOutcome {
        let mut outcome = BulkStatusOutcome::default();

        for id in ids {
            match self.update_status(id, status).await {
                Ok(()) => outcome.succeeded.push(id.clone()),
                Err(e) => outcome.failed.push(FailedUpdate {
                    id: id.clone(),
                    error: e.to_string(),
                }),
            }
        }

        debug!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Bulk status update"
        );

        outcome
    }

    /// Deletes a coupon.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn repo() -> CouponRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.coupons()
    }

    fn promo20() -> NewCoupon {
        NewCoupon {
            code: "promo20".to_string(),
            kind: DiscountKind::Percentage,
            value: 2000,
            max_discount: None,
            min_order_amount: 0,
            max_uses: Some(100),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_uppercases_code() {
        let repo = repo().await;
        let coupon = repo.insert(&promo20()).await.unwrap();
        assert_eq!(coupon.code, "PROMO20");

        // Lookup by the normalized form hits
        let found = repo.find_by_code("PROMO20").await.unwrap().unwrap();
        assert_eq!(found.id, coupon.id);
        assert_eq!(found.code, "PROMO20");
    }

    #[tokio::test]
    async fn test_find_by_code_missing_is_none() {
        let repo = repo().await;
        assert_eq!(repo.find_by_code("NOPE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = repo().await;
        repo.insert(&promo20()).await.unwrap();

        let err = repo.insert(&promo20()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let repo = repo().await;
        let mut new = promo20();
        new.max_discount = Some(500);
        new.min_order_amount = 1000;
        new.expires_at = Some(Utc::now() + Duration::days(30));

        let inserted = repo.insert(&new).await.unwrap();
        let found = repo.find_by_id(&inserted.id).await.unwrap().unwrap();

        assert_eq!(found.kind, DiscountKind::Percentage);
        assert_eq!(found.value, 2000);
        assert_eq!(found.max_discount, Some(500));
        assert_eq!(found.min_order_amount, 1000);
        assert_eq!(found.max_uses, Some(100));
        assert_eq!(found.current_uses, 0);
        assert_eq!(found.status, CouponStatus::Active);
        assert!(found.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_increment_use() {
        let repo = repo().await;
        let coupon = repo.insert(&promo20()).await.unwrap();

        repo.increment_use(&coupon.id).await.unwrap();
        repo.increment_use(&coupon.id).await.unwrap();

        let found = repo.find_by_id(&coupon.id).await.unwrap().unwrap();
        assert_eq!(found.current_uses, 2);
    }

    #[tokio::test]
    async fn test_increment_use_missing_coupon() {
        let repo = repo().await;
        let err = repo.increment_use("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = repo().await;
        let coupon = repo.insert(&promo20()).await.unwrap();

        repo.update_status(&coupon.id, CouponStatus::Inactive)
            .await
            .unwrap();

        let found = repo.find_by_id(&coupon.id).await.unwrap().unwrap();
        assert_eq!(found.status, CouponStatus::Inactive);
    }

    #[tokio::test]
    async fn test_update_status_many_reports_partial_failure() {
        let repo = repo().await;
        let a = repo.insert(&promo20()).await.unwrap();
        let mut other = promo20();
        other.code = "EID-2026".to_string();
        let b = repo.insert(&other).await.unwrap();

        let ids = vec![a.id.clone(), "ghost".to_string(), b.id.clone()];
        let outcome = repo
            .update_status_many(&ids, CouponStatus::Expired)
            .await;

        assert_eq!(outcome.succeeded, vec![a.id, b.id]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].id, "ghost");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let coupon = repo.insert(&promo20()).await.unwrap();

        repo.delete(&coupon.id).await.unwrap();
        assert_eq!(repo.find_by_id(&coupon.id).await.unwrap(), None);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[test]
    fn test_new_coupon_validation() {
        assert!(promo20().validate().is_ok());

        let mut bad = promo20();
        bad.value = 0; // 0% percentage
        assert!(bad.validate().is_err());

        let mut bad = promo20();
        bad.code = "HAS SPACE".to_string();
        assert!(bad.validate().is_err());

        let mut bad = promo20();
        bad.max_discount = Some(0);
        assert!(bad.validate().is_err());
    }
}
