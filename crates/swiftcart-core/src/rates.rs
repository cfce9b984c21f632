//! # Delivery Rates Module
//!
//! The delivery rate table and region resolver.
//!
//! ## How Resolution Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Region Resolution                                   │
//! │                                                                         │
//! │  Shopper picks region in checkout                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve(region)                                                       │
//! │       │                                                                 │
//! │       ├── no region / blank ──► Unresolved  ("pick a region first")    │
//! │       │                                                                 │
//! │       ├── unknown key ────────► NotServiced ("we don't deliver there") │
//! │       │                                                                 │
//! │       ├── fee == 0 ───────────► NotServiced (zero = not offered)       │
//! │       │                                                                 │
//! │       └── known, fee > 0 ─────► Quoted { fee, eta }                    │
//! │                                                                         │
//! │  Unresolved and NotServiced are distinct on purpose: the UI shows      │
//! │  "choose a region" for one and "undeliverable" for the other.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Source
//! The table is a bundled static dataset (`data/delivery_rates.json`),
//! embedded at compile time and loaded once at process start. It is never
//! mutated at runtime; a rate change means a redeploy, or an explicit table
//! swap via [`crate::pricing`]'s consumer (see `CheckoutEngine::reload_rates`
//! in swiftcart-checkout). Resolution is pure and deterministic for the
//! lifetime of a table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// The bundled rate dataset, embedded at compile time.
const BUNDLED_RATES: &str = include_str!("../data/delivery_rates.json");

// =============================================================================
// Delivery Rate
// =============================================================================

/// A region's flat delivery fee and estimated-delivery label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryRate {
    /// Flat fee in currency units. Zero means the region is listed but not
    /// currently offered.
    pub fee: i64,

    /// Human-readable estimate, shown verbatim in the storefront
    /// (e.g. "2-3 days").
    pub eta: String,
}

impl DeliveryRate {
    /// Returns the fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_units(self.fee)
    }
}

// =============================================================================
// Region Resolution
// =============================================================================

/// Outcome of resolving a region against the rate table.
///
/// `NotServiced` is a valid, expected outcome — not an error the engine
/// throws. The caller refuses checkout until the shopper picks a serviced
/// region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionResolution {
    /// Region is serviced; here is its rate.
    Quoted(DeliveryRate),

    /// Region is unknown to the table, or configured with a zero fee
    /// (zero is treated as "not offered").
    NotServiced,

    /// No region was supplied at all. Distinct from `NotServiced` so the UI
    /// can tell "not chosen yet" from "chosen but undeliverable".
    Unresolved,
}

// =============================================================================
// Delivery Rate Table
// =============================================================================

/// Read-only mapping from region code to delivery rate.
///
/// Constructed once at startup (usually from the bundled dataset) and
/// injected into the checkout engine. Explicitly constructed and passed
/// around — never a module-level cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRateTable {
    rates: HashMap<String, DeliveryRate>,
}

impl DeliveryRateTable {
    /// Loads the bundled static dataset.
    ///
    /// The dataset is embedded at compile time; if it ever fails to parse
    /// that is a broken build asset, so this panics rather than limping on
    /// without delivery anywhere.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_RATES).expect("bundled delivery rate dataset is valid JSON")
    }

    /// Parses a rate table from a JSON object of `region -> { fee, eta }`.
    ///
    /// ## Example
    /// ```rust
    /// use swiftcart_core::rates::DeliveryRateTable;
    ///
    /// let table = DeliveryRateTable::from_json(
    ///     r#"{ "karachi": { "fee": 200, "eta": "1-2 days" } }"#,
    /// ).unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let rates: HashMap<String, DeliveryRate> = serde_json::from_str(json)?;
        Ok(DeliveryRateTable { rates })
    }

    /// Builds a table from explicit entries. Handy in tests.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, DeliveryRate)>,
    {
        DeliveryRateTable {
            rates: entries.into_iter().collect(),
        }
    }

    /// Resolves a region code against the table.
    ///
    /// Pure and deterministic: same input, same table, same answer. The only
    /// "validation" performed is key lookup; region codes are matched
    /// verbatim.
    pub fn resolve(&self, region: Option<&str>) -> RegionResolution {
        let region = match region {
            Some(r) if !r.trim().is_empty() => r,
            _ => return RegionResolution::Unresolved,
        };

        match self.rates.get(region) {
            Some(rate) if rate.fee > 0 => RegionResolution::Quoted(rate.clone()),
            // Listed with zero fee = not offered; same answer as unknown
            Some(_) | None => RegionResolution::NotServiced,
        }
    }

    /// Region codes currently serviced (fee > 0), sorted for stable UI
    /// dropdowns.
    pub fn serviced_regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self
            .rates
            .iter()
            .filter(|(_, rate)| rate.fee > 0)
            .map(|(code, _)| code.as_str())
            .collect();
        regions.sort_unstable();
        regions
    }

    /// Number of regions in the table (serviced or not).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when the table has no regions at all.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for DeliveryRateTable {
    /// The bundled dataset.
    fn default() -> Self {
        DeliveryRateTable::bundled()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DeliveryRateTable {
        DeliveryRateTable::from_entries([
            (
                "karachi".to_string(),
                DeliveryRate {
                    fee: 200,
                    eta: "1-2 days".to_string(),
                },
            ),
            (
                "quetta".to_string(),
                DeliveryRate {
                    fee: 800,
                    eta: "5-7 days".to_string(),
                },
            ),
            (
                "gwadar".to_string(),
                DeliveryRate {
                    fee: 0,
                    eta: "not offered".to_string(),
                },
            ),
        ])
    }

    #[test]
    fn test_resolve_quoted() {
        match table().resolve(Some("karachi")) {
            RegionResolution::Quoted(rate) => {
                assert_eq!(rate.fee, 200);
                assert_eq!(rate.eta, "1-2 days");
            }
            other => panic!("expected Quoted, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_region_not_serviced() {
        assert_eq!(table().resolve(Some("atlantis")), RegionResolution::NotServiced);
    }

    #[test]
    fn test_resolve_zero_fee_not_serviced() {
        // A listed region with fee 0 is "not offered" — same as unknown
        assert_eq!(table().resolve(Some("gwadar")), RegionResolution::NotServiced);
    }

    #[test]
    fn test_resolve_missing_region_unresolved() {
        assert_eq!(table().resolve(None), RegionResolution::Unresolved);
        assert_eq!(table().resolve(Some("")), RegionResolution::Unresolved);
        assert_eq!(table().resolve(Some("   ")), RegionResolution::Unresolved);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let t = table();
        assert_eq!(t.resolve(Some("quetta")), t.resolve(Some("quetta")));
    }

    #[test]
    fn test_serviced_regions_excludes_zero_fee() {
        assert_eq!(table().serviced_regions(), vec!["karachi", "quetta"]);
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let bundled = DeliveryRateTable::bundled();
        assert!(!bundled.is_empty());
        // Every serviced region quotes a positive fee
        for code in bundled.serviced_regions() {
            match bundled.resolve(Some(code)) {
                RegionResolution::Quoted(rate) => assert!(rate.fee > 0),
                other => panic!("serviced region {code} resolved to {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DeliveryRateTable::from_json("not json").is_err());
    }
}
