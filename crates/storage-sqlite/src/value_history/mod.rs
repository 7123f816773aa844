//! SQLite storage implementation for the asset value history.

mod model;
mod repository;

pub use model::{NewValueHistoryDB, ValueHistoryDB};
pub use repository::{insert_entry, ValueHistoryRepository};
