//! Asset repository and ledger service traits.
//!
//! These traits define the contract for asset operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::assets_model::{Asset, AssetFilter, NewAsset, UpdateAssetDetails, UpdateAssetValue};
use crate::errors::Result;
use crate::summary::PortfolioSummary;
use crate::value_history::ValueHistoryEntry;

/// Trait defining the contract for Asset repository operations.
///
/// Every write that changes `current_value` must append the matching history
/// entry inside the same transaction, so that no reader ever observes one
/// without the other.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    /// Inserts an active asset and seeds its first history entry.
    async fn create(&self, new_asset: NewAsset) -> Result<Asset>;

    /// Sets a new current value and appends the matching history entry.
    ///
    /// Fails with not found for unknown ids and with `AssetError::Removed`
    /// for removed assets, in which case nothing is written.
    async fn update_value(&self, asset_id: i32, update: UpdateAssetValue) -> Result<Asset>;

    /// Edits descriptive fields. Never touches the value or the history.
    async fn update_details(&self, asset_id: i32, details: UpdateAssetDetails) -> Result<Asset>;

    /// Marks the asset as removed at `removal_date`, or now when absent.
    ///
    /// Removing an already removed asset leaves it untouched.
    async fn remove(&self, asset_id: i32, removal_date: Option<NaiveDateTime>) -> Result<Asset>;

    /// Clears the removal flag and timestamp.
    async fn restore(&self, asset_id: i32) -> Result<Asset>;

    /// Retrieves an asset by its ID.
    fn get_by_id(&self, asset_id: i32) -> Result<Asset>;

    /// Lists assets matching the filter, most recently updated first.
    fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>>;
}

/// Trait defining the contract for the asset ledger.
///
/// This is the only write path into the ledger: callers never append to the
/// value history directly.
#[async_trait]
pub trait AssetLedgerServiceTrait: Send + Sync {
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;

    async fn update_value(&self, asset_id: i32, update: UpdateAssetValue) -> Result<Asset>;

    async fn update_details(&self, asset_id: i32, details: UpdateAssetDetails) -> Result<Asset>;

    async fn remove_asset(
        &self,
        asset_id: i32,
        removal_date: Option<NaiveDateTime>,
    ) -> Result<Asset>;

    async fn restore_asset(&self, asset_id: i32) -> Result<Asset>;

    fn get_asset(&self, asset_id: i32) -> Result<Asset>;

    fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>>;

    /// Value history of an asset, newest first.
    fn get_value_history(&self, asset_id: i32) -> Result<Vec<ValueHistoryEntry>>;

    /// Aggregate over active assets, recomputed on every call.
    fn get_summary(&self) -> Result<PortfolioSummary>;
}
