//! Value history repository trait.

use async_trait::async_trait;

use super::value_history_model::{NewValueHistoryEntry, ValueHistoryEntry};
use crate::errors::Result;

/// Trait defining the contract for the value history store.
///
/// The store is append-only: there is no update or delete operation.
/// Referential integrity against the owning asset is enforced by the
/// backing store, and a missing asset surfaces as
/// `DatabaseError::ForeignKeyViolation`.
#[async_trait]
pub trait ValueHistoryRepositoryTrait: Send + Sync {
    /// Appends one immutable entry and returns it with its assigned id.
    async fn append(&self, entry: NewValueHistoryEntry) -> Result<ValueHistoryEntry>;

    /// Lists entries for an asset, newest `recorded_at` first.
    ///
    /// Entries sharing a `recorded_at` are ordered by id, descending.
    fn list_by_asset(&self, asset_id: i32) -> Result<Vec<ValueHistoryEntry>>;
}
