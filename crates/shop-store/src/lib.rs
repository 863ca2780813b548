//! Shop Store - SQLite persistence for the catalog schema
//!
//! Provides:
//! - Connection setup with foreign keys enforced
//! - Embedded, checksummed migrations creating every table and constraint
//! - `SqliteRepo` CRUD with explicit delete-policy steps
//! - Hydration of the whole catalog into an in-memory `Store`

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteRepo;
