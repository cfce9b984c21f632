//! Repository layer: typed database access per aggregate.

pub mod coupon;

pub use coupon::{BulkStatusOutcome, CouponRepository, FailedUpdate, NewCoupon};
