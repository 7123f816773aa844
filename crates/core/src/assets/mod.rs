//! Assets module - domain models, the ledger service, and storage traits.

mod assets_constants;
mod assets_errors;
mod assets_model;
mod assets_service;
mod assets_traits;

#[cfg(test)]
mod assets_model_tests;

// Re-export the public interface
pub use assets_constants::*;
pub use assets_errors::AssetError;
pub use assets_model::{
    Asset, AssetFilter, AssetState, NewAsset, UpdateAssetDetails, UpdateAssetValue,
};
pub use assets_service::AssetLedgerService;
pub use assets_traits::{AssetLedgerServiceTrait, AssetRepositoryTrait};
