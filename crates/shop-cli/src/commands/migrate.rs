//! Migrate command
//!
//! Usage: shopctl [--db <FILE>] migrate

use shop_core::ExError;
use shop_store::migrations::apply_migrations;

use crate::config::ShopConfig;

/// Execute migrate command
pub fn execute(config: &ShopConfig) -> Result<(), ExError> {
    let mut conn = super::open_database(config)?;
    let applied = apply_migrations(&mut conn)?;

    if applied.is_empty() {
        println!("{} is up to date", config.database.path.display());
    } else {
        for id in &applied {
            println!("applied {}", id);
        }
        println!(
            "{} migration(s) applied to {}",
            applied.len(),
            config.database.path.display()
        );
    }
    Ok(())
}
