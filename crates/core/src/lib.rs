//! Asset Ledger Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules of the asset value ledger: the
//! asset lifecycle (active/removed), the append-only value history, and the
//! summary projection over active assets. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod assets;
pub mod errors;
pub mod summary;
pub mod value_history;

// Re-export common types
pub use assets::*;
pub use summary::*;
pub use value_history::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
