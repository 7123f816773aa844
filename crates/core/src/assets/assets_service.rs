use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, error};

use super::assets_model::{Asset, AssetFilter, NewAsset, UpdateAssetDetails, UpdateAssetValue};
use super::assets_traits::{AssetLedgerServiceTrait, AssetRepositoryTrait};
use crate::errors::Result;
use crate::summary::{summarize, PortfolioSummary};
use crate::value_history::{ValueHistoryEntry, ValueHistoryRepositoryTrait};

/// Service owning the asset lifecycle.
///
/// Value-affecting writes are delegated to the asset repository, which
/// performs the row mutation and the history append as one transaction.
/// The history repository is only read from here.
pub struct AssetLedgerService {
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    value_history_repository: Arc<dyn ValueHistoryRepositoryTrait>,
}

impl AssetLedgerService {
    /// Creates a new AssetLedgerService instance
    pub fn new(
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        value_history_repository: Arc<dyn ValueHistoryRepositoryTrait>,
    ) -> Self {
        Self {
            asset_repository,
            value_history_repository,
        }
    }

    fn log_failure<T>(operation: &str, asset_id: i32, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_storage_failure() {
                error!("{} failed for asset {}: {}", operation, asset_id, e);
            } else {
                debug!("{} rejected for asset {}: {}", operation, asset_id, e);
            }
        }
        result
    }
}

#[async_trait]
impl AssetLedgerServiceTrait for AssetLedgerService {
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        debug!(
            "Creating asset '{}' in category '{}' with value {}",
            new_asset.name, new_asset.category, new_asset.current_value
        );
        let asset = self.asset_repository.create(new_asset).await;
        if let Err(e) = &asset {
            error!("Failed to create asset: {}", e);
        }
        asset
    }

    async fn update_value(&self, asset_id: i32, update: UpdateAssetValue) -> Result<Asset> {
        debug!("Updating value of asset {} to {}", asset_id, update.value);
        let result = self.asset_repository.update_value(asset_id, update).await;
        Self::log_failure("Value update", asset_id, result)
    }

    async fn update_details(&self, asset_id: i32, details: UpdateAssetDetails) -> Result<Asset> {
        if details.is_empty() {
            return self.asset_repository.get_by_id(asset_id);
        }
        let result = self.asset_repository.update_details(asset_id, details).await;
        Self::log_failure("Details update", asset_id, result)
    }

    async fn remove_asset(
        &self,
        asset_id: i32,
        removal_date: Option<NaiveDateTime>,
    ) -> Result<Asset> {
        debug!("Removing asset {} (removal date: {:?})", asset_id, removal_date);
        let result = self.asset_repository.remove(asset_id, removal_date).await;
        Self::log_failure("Removal", asset_id, result)
    }

    async fn restore_asset(&self, asset_id: i32) -> Result<Asset> {
        debug!("Restoring asset {}", asset_id);
        let result = self.asset_repository.restore(asset_id).await;
        Self::log_failure("Restore", asset_id, result)
    }

    fn get_asset(&self, asset_id: i32) -> Result<Asset> {
        self.asset_repository.get_by_id(asset_id)
    }

    fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
        self.asset_repository.list(filter)
    }

    fn get_value_history(&self, asset_id: i32) -> Result<Vec<ValueHistoryEntry>> {
        // Unknown ids are an error rather than an empty history.
        let asset = self.asset_repository.get_by_id(asset_id)?;
        debug!(
            "Loading value history of asset {} ({})",
            asset.id,
            asset.state().as_str()
        );
        self.value_history_repository.list_by_asset(asset.id)
    }

    fn get_summary(&self) -> Result<PortfolioSummary> {
        let active = self.asset_repository.list(&AssetFilter::active())?;
        Ok(summarize(&active))
    }
}
