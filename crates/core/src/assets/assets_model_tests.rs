//! Unit tests for asset domain models.

use super::*;
use crate::errors::{Error, ValidationError};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

fn ts(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn sample_asset(removed: bool) -> Asset {
    Asset {
        id: 7,
        name: "Car".to_string(),
        category: "Vehicle".to_string(),
        purchase_price: Some(dec!(25000)),
        purchase_date: NaiveDate::from_ymd_opt(2021, 1, 15),
        current_value: dec!(20000),
        date_added: ts(8),
        last_updated: ts(10),
        removed,
        removed_at: removed.then(|| ts(11)),
        notes: None,
    }
}

#[test]
fn test_state_follows_removed_flag() {
    assert_eq!(sample_asset(false).state(), AssetState::Active);
    assert_eq!(sample_asset(true).state(), AssetState::Removed);
    assert!(sample_asset(false).is_active());
}

#[test]
fn test_ensure_active_rejects_removed_asset() {
    assert!(sample_asset(false).ensure_active().is_ok());

    let err = sample_asset(true).ensure_active().unwrap_err();
    assert!(err.is_invalid_state());
    assert!(!err.is_not_found());
    assert!(matches!(err, Error::Asset(AssetError::Removed(7))));
}

#[test]
fn test_resolve_removal_time_defaults_to_now() {
    let asset = sample_asset(false);
    let now = ts(12);
    assert_eq!(asset.resolve_removal_time(None, now).unwrap(), now);
}

#[test]
fn test_resolve_removal_time_accepts_explicit_date() {
    let asset = sample_asset(false);
    let requested = ts(10) + Duration::minutes(5);
    assert_eq!(
        asset.resolve_removal_time(Some(requested), ts(12)).unwrap(),
        requested
    );
}

#[test]
fn test_resolve_removal_time_rejects_date_before_last_update() {
    let asset = sample_asset(false);
    let err = asset.resolve_removal_time(Some(ts(9)), ts(12)).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
}

#[test]
fn test_asset_filter_matching() {
    let active = sample_asset(false);
    let removed = sample_asset(true);

    assert!(AssetFilter::active().matches(&active));
    assert!(!AssetFilter::active().matches(&removed));
    assert!(AssetFilter::all().matches(&removed));
    assert!(AssetFilter::all().in_category("Vehicle").matches(&removed));
    assert!(!AssetFilter::active().in_category("Art").matches(&active));
}

#[test]
fn test_update_details_is_empty() {
    assert!(UpdateAssetDetails::default().is_empty());
    let details = UpdateAssetDetails {
        notes: Some("garage kept".to_string()),
        ..Default::default()
    };
    assert!(!details.is_empty());
}

#[test]
fn test_asset_serializes_camel_case() {
    let json = serde_json::to_value(sample_asset(true)).unwrap();
    assert_eq!(json["currentValue"], serde_json::json!(20000.0));
    assert_eq!(json["removed"], serde_json::json!(true));
    assert!(json.get("removedAt").is_some());
    assert!(json.get("lastUpdated").is_some());
}
