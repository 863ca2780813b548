//! Repository layer for persisting catalog records to SQLite
//!
//! Bridges the in-memory `Store` and the relational schema

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
