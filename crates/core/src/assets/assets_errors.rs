use thiserror::Error;

/// Lifecycle errors raised by the asset ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The asset exists but is soft-deleted, so its value cannot change.
    #[error("Cannot modify removed asset {0}")]
    Removed(i32),
}
