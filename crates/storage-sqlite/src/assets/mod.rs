//! SQLite storage implementation for assets.

mod model;
mod repository;

pub use model::{AssetDB, AssetDetailsChangeset, NewAssetDB};
pub use repository::AssetRepository;
