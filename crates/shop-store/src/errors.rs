//! Error handling for shop-store
//!
//! Wraps shop-core ExError with store-specific helpers

use rusqlite::ffi;
use shop_core::errors::{ExError, ExErrorKind};
use shop_core::model::EntityKind;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// The database records a migration this build does not know
pub fn unknown_migration(migration_id: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!(
            "Database has migration {} which is not embedded in this build",
            migration_id
        ))
}

pub fn not_found(entity: EntityKind, id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_entity(entity)
        .with_entity_id(id)
        .with_message(format!("{} not found: {}", entity, id))
}

/// Create a database error from rusqlite::Error
///
/// Constraint failures are classified by their extended result code; the
/// engine's message is kept as is.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    ExErrorKind::UniqueViolation
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ExErrorKind::ForeignKeyViolation,
                _ => ExErrorKind::ConstraintViolation,
            }
        }
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}
