//! Hydration layer - loads catalog rows from SQLite into a Store
//!
//! Rows are inserted as stored: the database already enforced unique
//! columns and foreign keys, so no constraint is re-checked here.

use std::time::Instant;

use rusqlite::Connection;
use shop_core::model::EntityKind;
use shop_core::ops::Store;
use shop_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::Result;
use crate::repo::SqliteRepo;

/// Load every catalog table into a fresh Store
pub fn load_catalog(conn: &Connection) -> Result<Store> {
    log_op_start!("load_catalog");
    let start = Instant::now();

    match load_all(conn) {
        Ok(store) => {
            log_op_end!(
                "load_catalog",
                duration_ms = start.elapsed().as_millis() as u64,
                products = store.count(EntityKind::Product),
                categories = store.count(EntityKind::Category)
            );
            Ok(store)
        }
        Err(e) => {
            log_op_error!(
                "load_catalog",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

fn load_all(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();

    for user in SqliteRepo::list_users(conn)? {
        store.insert_user(user);
    }
    for category in SqliteRepo::list_categories(conn)? {
        store.insert_category(category);
    }
    for sub_category in SqliteRepo::list_sub_categories(conn)? {
        store.insert_sub_category(sub_category);
    }
    for brand in SqliteRepo::list_brands(conn)? {
        store.insert_brand(brand);
    }
    for attribute in SqliteRepo::list_attributes(conn)? {
        store.insert_attribute(attribute);
    }
    for product in SqliteRepo::list_products(conn)? {
        store.insert_product(product);
    }
    for value in SqliteRepo::list_attribute_values(conn)? {
        store.insert_attribute_value(value);
    }

    Ok(store)
}
