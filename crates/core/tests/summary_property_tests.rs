//! Property-based tests for the ledger summary projection.
//!
//! These tests verify that the aggregate view stays consistent with the
//! active asset set for arbitrary mixes of active and removed assets.

use assetledger_core::{summarize, Asset, AssetFilter};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Vehicle".to_string()),
        Just("Property".to_string()),
        Just("Art".to_string()),
        Just("Cash".to_string()),
    ]
}

/// Generates an asset with a two-decimal value and a random lifecycle state.
fn arb_asset() -> impl Strategy<Value = (String, i64, bool)> {
    (arb_category(), 0i64..10_000_000, any::<bool>())
}

fn build_assets(specs: Vec<(String, i64, bool)>) -> Vec<Asset> {
    let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (category, cents, removed))| Asset {
            id: i as i32 + 1,
            name: format!("asset-{}", i),
            category,
            purchase_price: None,
            purchase_date: None,
            current_value: Decimal::new(cents, 2),
            date_added: ts,
            last_updated: ts,
            removed,
            removed_at: removed.then_some(ts),
            notes: None,
        })
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The total equals the sum of current values over exactly the active assets.
    #[test]
    fn prop_total_matches_active_sum(specs in proptest::collection::vec(arb_asset(), 0..30)) {
        let assets = build_assets(specs);
        let summary = summarize(&assets);

        let expected: Decimal = assets
            .iter()
            .filter(|a| !a.removed)
            .map(|a| a.current_value)
            .sum();
        let active_count = assets.iter().filter(|a| !a.removed).count();

        prop_assert_eq!(summary.total_value, expected);
        prop_assert_eq!(summary.total_count, active_count);
    }

    /// Category rows add up to the totals and are strictly ordered by name.
    #[test]
    fn prop_categories_partition_the_total(specs in proptest::collection::vec(arb_asset(), 0..30)) {
        let assets = build_assets(specs);
        let summary = summarize(&assets);

        let count: usize = summary.categories.iter().map(|c| c.count).sum();
        let value: Decimal = summary.categories.iter().map(|c| c.total_value).sum();
        prop_assert_eq!(count, summary.total_count);
        prop_assert_eq!(value, summary.total_value);

        for pair in summary.categories.windows(2) {
            prop_assert!(pair[0].category < pair[1].category);
        }
        for category in &summary.categories {
            prop_assert!(category.count > 0);
        }
    }

    /// Removed assets never influence the summary.
    #[test]
    fn prop_removed_assets_do_not_matter(specs in proptest::collection::vec(arb_asset(), 0..30)) {
        let assets = build_assets(specs);
        let active: Vec<Asset> = assets
            .iter()
            .filter(|a| AssetFilter::active().matches(a))
            .cloned()
            .collect();

        prop_assert_eq!(summarize(&assets), summarize(&active));
    }
}
