//! Migration runner
//!
//! Applies migrations with checksums and idempotency

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, unknown_migration, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration};
use rusqlite::{Connection, OptionalExtension};
use shop_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// A row of the `schema_version` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub migration_id: String,
    pub applied_at: i64,
    pub checksum: String,
}

/// Apply all pending migrations to the database
///
/// Returns the ids of the migrations applied by this call; re-running on
/// an up-to-date database applies nothing.
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<String>> {
    log_op_start!("apply_migrations");
    let start = Instant::now();

    let result = run(conn);

    match &result {
        Ok(applied) => {
            log_op_end!(
                "apply_migrations",
                duration_ms = start.elapsed().as_millis() as u64,
                applied = applied.len()
            );
        }
        Err(e) => {
            log_op_error!(
                "apply_migrations",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn run(conn: &mut Connection) -> Result<Vec<String>> {
    create_schema_version_table(conn)?;

    let migrations = get_migrations();
    for recorded in applied_migrations(conn)? {
        if !migrations.iter().any(|m| m.id == recorded.migration_id) {
            return Err(unknown_migration(&recorded.migration_id));
        }
    }

    let mut applied = Vec::new();
    for migration in &migrations {
        if apply_migration(conn, migration)? {
            applied.push(migration.id.to_string());
        }
    }
    Ok(applied)
}

/// Migrations recorded in `schema_version`, oldest first
pub fn applied_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    let mut stmt = conn
        .prepare("SELECT migration_id, applied_at, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedMigration {
                migration_id: row.get(0)?,
                applied_at: row.get(1)?,
                checksum: row.get(2)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Ids of the embedded migrations not yet recorded, in apply order
///
/// A database that was never migrated reports every migration as pending.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    let tracked: bool = conn
        .query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    let recorded = if tracked {
        applied_migrations(conn)?
    } else {
        Vec::new()
    };

    Ok(get_migrations()
        .into_iter()
        .filter(|m| !recorded.iter().any(|r| r.migration_id == m.id))
        .map(|m| m.id)
        .collect())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Apply a single migration if not already applied
///
/// Returns whether the migration ran.
fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = compute_checksum(migration.sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration.id, &recorded, &checksum));
        }
        return Ok(false);
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp_millis();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "migration applied");
    Ok(true)
}
