//! Value history domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single immutable observation of an asset's value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueHistoryEntry {
    pub id: i32,
    pub asset_id: i32,
    pub value: Decimal,
    /// The moment the value pertains to. Supplied by the caller, so it may
    /// lie in the past when backfilling.
    pub recorded_at: NaiveDateTime,
    pub notes: Option<String>,
    /// System time at which the row was written.
    pub created_at: NaiveDateTime,
}

/// Input model for appending a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewValueHistoryEntry {
    pub asset_id: i32,
    pub value: Decimal,
    pub recorded_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl NewValueHistoryEntry {
    pub fn new(
        asset_id: i32,
        value: Decimal,
        recorded_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            asset_id,
            value,
            recorded_at,
            notes,
        }
    }
}
