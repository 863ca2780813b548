//! Command implementations

pub mod audit;
pub mod migrate;
pub mod summary;

use rusqlite::Connection;
use shop_core::{ExError, ExErrorKind};
use shop_store::migrations::pending_migrations;

use crate::config::ShopConfig;

/// Open the configured database with foreign keys enforced
fn open_database(config: &ShopConfig) -> Result<Connection, ExError> {
    shop_store::db::open_with(&config.database.path, config.database.wal)
}

/// Open an existing database, refusing one with pending migrations
///
/// A missing file is reported without being created.
fn open_migrated(config: &ShopConfig) -> Result<Connection, ExError> {
    if !config.database.path.exists() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("open_catalog")
            .with_message(format!(
                "{} does not exist; run `shopctl migrate` to create it",
                config.database.path.display()
            )));
    }
    let conn = open_database(config)?;
    let pending = pending_migrations(&conn)?;
    if !pending.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("open_catalog")
            .with_message(format!(
                "{} has pending migrations ({}); run `shopctl migrate` first",
                config.database.path.display(),
                pending.join(", ")
            )));
    }
    Ok(conn)
}
