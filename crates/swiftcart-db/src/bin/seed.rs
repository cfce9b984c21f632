//! # Seed Data Generator
//!
//! Populates the database with demo coupons for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default dev database
//! cargo run -p swiftcart-db --bin seed
//!
//! # Specify database path
//! cargo run -p swiftcart-db --bin seed -- --db ./data/swiftcart.db
//! ```
//!
//! ## Generated Coupons
//! A small fixed set covering every shape the checkout engine handles:
//! percentage with and without caps, fixed amounts, minimum-order gates,
//! limited-use codes, expired and inactive codes for negative-path demos.

use chrono::{Duration, Utc};
use std::env;
use swiftcart_core::DiscountKind;
use swiftcart_db::{Database, DbConfig, NewCoupon};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./swiftcart_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Swiftcart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./swiftcart_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Swiftcart Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.coupons().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} coupons", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding coupons...");

    let now = Utc::now();
    let mut seeded = 0;

    for new in demo_coupons(now) {
        new.validate()?;
        let coupon = db.coupons().insert(&new).await?;
        println!("  + {} ({:?}, value {})", coupon.code, coupon.kind, coupon.value);
        seeded += 1;
    }

    // Expired and inactive demo codes for negative-path testing
    let stale = NewCoupon {
        code: "LASTYEAR".to_string(),
        kind: DiscountKind::Percentage,
        value: 1000,
        max_discount: None,
        min_order_amount: 0,
        max_uses: None,
        expires_at: Some(now - Duration::days(30)),
    };
    let coupon = db.coupons().insert(&stale).await?;
    println!("  + {} (expired 30 days ago)", coupon.code);
    seeded += 1;

    let paused = NewCoupon {
        code: "PAUSED10".to_string(),
        kind: DiscountKind::Percentage,
        value: 1000,
        max_discount: None,
        min_order_amount: 0,
        max_uses: None,
        expires_at: None,
    };
    let coupon = db.coupons().insert(&paused).await?;
    db.coupons()
        .update_status(&coupon.id, swiftcart_core::CouponStatus::Inactive)
        .await?;
    println!("  + {} (inactive)", coupon.code);
    seeded += 1;

    println!();
    println!("✓ Seeded {} coupons", seeded);

    Ok(())
}

/// The active demo coupons: one per discount shape.
fn demo_coupons(now: chrono::DateTime<Utc>) -> Vec<NewCoupon> {
    vec![
        // Flat 20% off, no strings attached
        NewCoupon {
            code: "PROMO20".to_string(),
            kind: DiscountKind::Percentage,
            value: 2000,
            max_discount: None,
            min_order_amount: 0,
            max_uses: None,
            expires_at: None,
        },
        // 25% off but capped at Rs 500
        NewCoupon {
            code: "EID25".to_string(),
            kind: DiscountKind::Percentage,
            value: 2500,
            max_discount: Some(500),
            min_order_amount: 0,
            max_uses: None,
            expires_at: Some(now + Duration::days(14)),
        },
        // Rs 150 off orders of Rs 1000 or more
        NewCoupon {
            code: "FLAT150".to_string(),
            kind: DiscountKind::Fixed,
            value: 150,
            max_discount: None,
            min_order_amount: 1000,
            max_uses: None,
            expires_at: None,
        },
        // First 100 redemptions only
        NewCoupon {
            code: "EARLY100".to_string(),
            kind: DiscountKind::Percentage,
            value: 1500,
            max_discount: Some(300),
            min_order_amount: 500,
            max_uses: Some(100),
            expires_at: Some(now + Duration::days(7)),
        },
        // Big fixed discount with a high minimum
        NewCoupon {
            code: "BULK-500".to_string(),
            kind: DiscountKind::Fixed,
            value: 500,
            max_discount: None,
            min_order_amount: 5000,
            max_uses: None,
            expires_at: None,
        },
    ]
}
