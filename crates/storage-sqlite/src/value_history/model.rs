//! Database models for the value history.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use assetledger_core::value_history::{NewValueHistoryEntry, ValueHistoryEntry};

use crate::errors::StorageError;
use crate::utils::{format_decimal, parse_decimal};

/// Database model for a value history row
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_value_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ValueHistoryDB {
    pub id: i32,
    pub asset_id: i32,
    pub value: String,
    pub recorded_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for appending a value history row
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_value_history)]
#[serde(rename_all = "camelCase")]
pub struct NewValueHistoryDB {
    pub asset_id: i32,
    pub value: String,
    pub recorded_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewValueHistoryDB {
    /// Builds the row for `entry`, stamped with the write time `created_at`.
    pub fn from_domain(entry: NewValueHistoryEntry, created_at: NaiveDateTime) -> Self {
        Self {
            asset_id: entry.asset_id,
            value: format_decimal(&entry.value),
            recorded_at: entry.recorded_at,
            notes: entry.notes,
            created_at,
        }
    }
}

impl TryFrom<ValueHistoryDB> for ValueHistoryEntry {
    type Error = StorageError;

    fn try_from(db: ValueHistoryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            asset_id: db.asset_id,
            value: parse_decimal(&db.value, "value")?,
            recorded_at: db.recorded_at,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}
