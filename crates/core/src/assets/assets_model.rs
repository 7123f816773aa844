//! Asset domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assets_errors::AssetError;
use crate::errors::{Result, ValidationError};

/// Lifecycle state of an asset.
///
/// Removal is a soft delete: the row and its history stay in place and the
/// asset can be restored at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    Active,
    Removed,
}

impl AssetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetState::Active => "ACTIVE",
            AssetState::Removed => "REMOVED",
        }
    }
}

/// Domain model representing a tracked asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    /// Live value; always equal to the value of the newest history entry.
    pub current_value: Decimal,
    pub date_added: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub removed: bool,
    pub removed_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl Asset {
    pub fn state(&self) -> AssetState {
        if self.removed {
            AssetState::Removed
        } else {
            AssetState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == AssetState::Active
    }

    /// Fails with `AssetError::Removed` unless the asset accepts value changes.
    pub fn ensure_active(&self) -> Result<()> {
        match self.state() {
            AssetState::Active => Ok(()),
            AssetState::Removed => Err(AssetError::Removed(self.id).into()),
        }
    }

    /// Resolves the timestamp to store as `removed_at`.
    ///
    /// The removal time may not precede the last value change, otherwise the
    /// asset would appear to have been modified after it was removed.
    pub fn resolve_removal_time(
        &self,
        requested: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime> {
        let removed_at = requested.unwrap_or(now);
        if removed_at < self.last_updated {
            return Err(ValidationError::InvalidInput(format!(
                "Removal date {} is earlier than the last update {} of asset {}",
                removed_at, self.last_updated, self.id
            ))
            .into());
        }
        Ok(removed_at)
    }
}

/// Input model for creating a new asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    pub category: String,
    pub current_value: Decimal,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewAsset {
    pub fn new(name: impl Into<String>, category: impl Into<String>, current_value: Decimal) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            current_value,
            purchase_price: None,
            purchase_date: None,
            notes: None,
        }
    }

    pub fn with_purchase(mut self, price: Decimal, date: Option<NaiveDate>) -> Self {
        self.purchase_price = Some(price);
        self.purchase_date = date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Input model for recording a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetValue {
    pub value: Decimal,
    pub notes: Option<String>,
}

impl UpdateAssetValue {
    pub fn new(value: Decimal, notes: impl Into<String>) -> Self {
        Self {
            value,
            notes: Some(notes.into()),
        }
    }
}

/// Input model for editing descriptive fields.
///
/// `None` leaves the stored field unchanged. The value is not editable here;
/// it only changes through a value update so history stays complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetDetails {
    pub name: Option<String>,
    pub category: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateAssetDetails {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.purchase_price.is_none()
            && self.purchase_date.is_none()
            && self.notes.is_none()
    }
}

/// Filter applied when listing assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetFilter {
    #[serde(default)]
    pub include_removed: bool,
    pub category: Option<String>,
}

impl AssetFilter {
    /// Active assets of every category.
    pub fn active() -> Self {
        Self::default()
    }

    /// Active and removed assets of every category.
    pub fn all() -> Self {
        Self {
            include_removed: true,
            category: None,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        (self.include_removed || asset.is_active())
            && self
                .category
                .as_deref()
                .map_or(true, |category| asset.category == category)
    }
}
