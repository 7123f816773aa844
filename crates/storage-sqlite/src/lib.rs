//! SQLite storage implementation for the asset ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `assetledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single writer actor that serializes and transacts all writes
//! - Repository implementations for assets and their value history
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod assets;
pub mod value_history;

// Re-export database utilities
pub use db::{
    backup_database, create_pool, get_connection, get_db_path, init, run_migrations,
    spawn_writer, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use assets::AssetRepository;
pub use value_history::ValueHistoryRepository;

// Re-export core types for convenience
pub use assetledger_core::errors::{DatabaseError, Error, Result};
