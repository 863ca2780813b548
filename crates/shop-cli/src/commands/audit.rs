//! Audit command
//!
//! Usage: shopctl [--db <FILE>] audit
//!
//! Rows reach the database without validation; this runs the full field
//! validation over every stored record and lists what it rejects.

use shop_core::model::EntityKind;
use shop_core::{ExError, ExErrorKind};
use shop_core::rules::validation::audit_store;
use shop_store::repo::hydration::load_catalog;

use crate::config::ShopConfig;

/// Execute audit command
///
/// Fails when at least one record is invalid.
pub fn execute(config: &ShopConfig) -> Result<(), ExError> {
    let conn = super::open_migrated(config)?;
    let store = load_catalog(&conn)?;
    let findings = audit_store(&store);

    let checked: usize = EntityKind::ALL.iter().map(|&kind| store.count(kind)).sum();

    if findings.is_empty() {
        println!("{} record(s) checked, all valid", checked);
        return Ok(());
    }

    for finding in &findings {
        for error in finding.errors.errors() {
            println!("{} {}: {}", finding.entity, finding.id, error);
        }
    }
    Err(ExError::new(ExErrorKind::ValidationFailed)
        .with_op("audit")
        .with_message(format!(
            "{} of {} record(s) failed validation",
            findings.len(),
            checked
        )))
}
