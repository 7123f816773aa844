//! Value history module - the append-only log of asset value observations.

mod value_history_model;
mod value_history_traits;

pub use value_history_model::{NewValueHistoryEntry, ValueHistoryEntry};
pub use value_history_traits::ValueHistoryRepositoryTrait;
