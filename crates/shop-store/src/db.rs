//! Database connection management
//!
//! Every connection handed out here enforces foreign keys.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) a database file with foreign keys and WAL enabled
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    open_with(path, true)
}

/// Open a database file, choosing the journal mode
pub fn open_with<P: AsRef<Path>>(path: P, wal: bool) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    if wal {
        enable_wal(&conn)?;
    }
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Enforce foreign keys on this connection
///
/// SQLite leaves them off by default and the setting is per connection.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)
}

/// Switch a file database to write-ahead logging
pub fn enable_wal(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)
}

/// Whether foreign keys are enforced on this connection
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    conn.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0))
        .map(|on| on == 1)
        .map_err(from_rusqlite)
}
