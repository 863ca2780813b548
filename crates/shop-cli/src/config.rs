//! shopctl configuration
//!
//! ```toml
//! [database]
//! path = "shop.db"
//! wal = true
//!
//! [logging]
//! profile = "production"
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shop_core::logging_facility::Profile;
use shop_core::{ExError, ExErrorKind};

pub const DEFAULT_DB_PATH: &str = "shop.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Write-ahead logging for the database file
    pub wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            wal: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl ShopConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("read_config")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ExError> {
        toml::from_str(content).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("parse_config")
                .with_message(e.to_string())
        })
    }

    /// Read the optional file, then apply the flag overrides
    pub fn load(file: Option<&Path>, db: Option<PathBuf>) -> Result<Self, ExError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(db) = db {
            config.database.path = db;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ShopConfig::from_toml_str("").unwrap();
        assert_eq!(config.database.path, PathBuf::from(DEFAULT_DB_PATH));
        assert!(config.database.wal);
        assert_eq!(config.logging.profile, Profile::Development);
    }

    #[test]
    fn test_sections_are_read() {
        let config = ShopConfig::from_toml_str(
            r#"
            [database]
            path = "/var/lib/shop/catalog.db"
            wal = false

            [logging]
            profile = "production"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/shop/catalog.db"));
        assert!(!config.database.wal);
        assert_eq!(config.logging.profile, Profile::Production);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = ShopConfig::from_toml_str("[database]\nfile = \"x.db\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }

    #[test]
    fn test_db_flag_overrides_file() {
        let config = ShopConfig::load(None, Some(PathBuf::from("other.db"))).unwrap();
        assert_eq!(config.database.path, PathBuf::from("other.db"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ShopConfig::load(Some(Path::new("/nonexistent/shopctl.toml")), None).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
    }
}
