//! Database models for assets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use assetledger_core::assets::{Asset, NewAsset, UpdateAssetDetails};

use crate::errors::StorageError;
use crate::utils::{format_decimal, parse_decimal, parse_optional_decimal};

/// Database model for assets
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AssetDB {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub purchase_price: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub current_value: String,
    pub date_added: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub removed: bool,
    pub removed_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

/// Database model for creating a new asset
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[serde(rename_all = "camelCase")]
pub struct NewAssetDB {
    pub name: String,
    pub category: String,
    pub purchase_price: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub current_value: String,
    pub date_added: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub removed: bool,
    pub notes: Option<String>,
}

impl NewAssetDB {
    /// Builds an active asset row created at `now`.
    pub fn from_domain(new_asset: NewAsset, now: NaiveDateTime) -> Self {
        Self {
            name: new_asset.name,
            category: new_asset.category,
            purchase_price: new_asset.purchase_price.as_ref().map(format_decimal),
            purchase_date: new_asset.purchase_date,
            current_value: format_decimal(&new_asset.current_value),
            date_added: now,
            last_updated: now,
            removed: false,
            notes: new_asset.notes,
        }
    }
}

/// Partial update of descriptive columns. `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::assets)]
pub struct AssetDetailsChangeset {
    pub name: Option<String>,
    pub category: Option<String>,
    pub purchase_price: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

impl AssetDetailsChangeset {
    /// `touched_at` bumps `last_updated` when present.
    pub fn from_domain(details: UpdateAssetDetails, touched_at: Option<NaiveDateTime>) -> Self {
        Self {
            name: details.name,
            category: details.category,
            purchase_price: details.purchase_price.as_ref().map(format_decimal),
            purchase_date: details.purchase_date,
            notes: details.notes,
            last_updated: touched_at,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.category.is_some()
            || self.purchase_price.is_some()
            || self.purchase_date.is_some()
            || self.notes.is_some()
            || self.last_updated.is_some()
    }
}

impl TryFrom<AssetDB> for Asset {
    type Error = StorageError;

    fn try_from(db: AssetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            category: db.category,
            purchase_price: parse_optional_decimal(db.purchase_price.as_deref(), "purchase_price")?,
            purchase_date: db.purchase_date,
            current_value: parse_decimal(&db.current_value, "current_value")?,
            date_added: db.date_added,
            last_updated: db.last_updated,
            removed: db.removed,
            removed_at: db.removed_at,
            notes: db.notes,
        })
    }
}
