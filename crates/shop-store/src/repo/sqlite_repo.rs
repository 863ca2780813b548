//! SQLite repository implementation
//!
//! Writes never run validation: a row breaking the discount rule is stored
//! as given. Constraint failures come back as classified `ExError`s that
//! keep SQLite's own message.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use shop_core::errors::ExError;
use shop_core::model::{
    Attribute, Brand, Category, EntityKind, ForeignKey, Product, ProductAttributeValue,
    SubCategory, User,
};
use shop_core::ops::{plan_delete, DeletePlan, Dependents};
use shop_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{from_rusqlite, not_found, Result};

/// SQLite repository for every catalog table
pub struct SqliteRepo;

// ===== Row mapping =====

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}

fn decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    text.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: timestamp(row, 2)?,
    })
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        meta_description: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}

fn sub_category_from_row(row: &Row<'_>) -> rusqlite::Result<SubCategory> {
    Ok(SubCategory {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        meta_description: row.get(4)?,
        created_at: timestamp(row, 5)?,
        updated_at: timestamp(row, 6)?,
    })
}

fn brand_from_row(row: &Row<'_>) -> rusqlite::Result<Brand> {
    Ok(Brand {
        id: row.get(0)?,
        name: row.get(1)?,
        localized_name: row.get(2)?,
        url: row.get(3)?,
        logo: row.get(4)?,
    })
}

fn attribute_from_row(row: &Row<'_>) -> rusqlite::Result<Attribute> {
    Ok(Attribute {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
    })
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        sub_category_id: row.get(3)?,
        brand_id: row.get(4)?,
        count: row.get(5)?,
        price: decimal(row, 6)?,
        off_price: decimal(row, 7)?,
        is_off: row.get(8)?,
        is_stock: row.get(9)?,
        description: row.get(10)?,
        meta_description: row.get(11)?,
        created_at: timestamp(row, 12)?,
        updated_at: timestamp(row, 13)?,
    })
}

fn attribute_value_from_row(row: &Row<'_>) -> rusqlite::Result<ProductAttributeValue> {
    Ok(ProductAttributeValue {
        id: row.get(0)?,
        attribute_id: row.get(1)?,
        product_id: row.get(2)?,
        value: row.get(3)?,
    })
}

// ===== Query helpers =====

fn query_one<T>(
    conn: &Connection,
    sql: &str,
    id: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    conn.query_row(sql, [id], map)
        .optional()
        .map_err(from_rusqlite)
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], map)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Fail with `NotFound` when an UPDATE matched no row
fn ensure_updated(changed: usize, entity: EntityKind, id: &str) -> Result<()> {
    if changed == 0 {
        return Err(not_found(entity, id));
    }
    Ok(())
}

fn row_exists(conn: &Connection, entity: EntityKind, id: &str) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", entity.table_name());
    conn.query_row(&sql, [id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(from_rusqlite)
}

/// Referencing-row lookups for the delete planner, bound to one transaction
struct SqlDependents<'c>(&'c Connection);

impl Dependents for SqlDependents<'_> {
    type Error = ExError;

    fn dependents(&self, fk: ForeignKey, parent_id: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1 ORDER BY id",
            fk.child().table_name(),
            fk.column()
        );
        let mut stmt = self.0.prepare(&sql).map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([parent_id], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }
}

impl SqliteRepo {
    // ===== Users =====

    pub fn insert_user(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
            params![user.id, user.username, user.created_at.timestamp_millis()],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>> {
        query_one(
            conn,
            "SELECT id, username, created_at FROM users WHERE id = ?1",
            id,
            user_from_row,
        )
    }

    pub fn update_user(conn: &Connection, user: &User) -> Result<()> {
        let changed = conn
            .execute(
                "UPDATE users SET username = ?2 WHERE id = ?1",
                params![user.id, user.username],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::User, &user.id)
    }

    /// Users ordered by id
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        query_all(
            conn,
            "SELECT id, username, created_at FROM users ORDER BY id",
            user_from_row,
        )
    }

    // ===== Categories =====

    pub fn insert_category(conn: &Connection, category: &Category) -> Result<()> {
        conn.execute(
            "INSERT INTO categories (id, name, slug, meta_description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.id,
                category.name,
                category.slug,
                category.meta_description,
                category.created_at.timestamp_millis(),
                category.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_category(conn: &Connection, id: &str) -> Result<Option<Category>> {
        query_one(
            conn,
            "SELECT id, name, slug, meta_description, created_at, updated_at
             FROM categories WHERE id = ?1",
            id,
            category_from_row,
        )
    }

    /// Write the mutable columns and refresh `updated_at` on `category`
    pub fn update_category(conn: &Connection, category: &mut Category) -> Result<()> {
        category.touch();
        let changed = conn
            .execute(
                "UPDATE categories SET name = ?2, slug = ?3, meta_description = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    category.id,
                    category.name,
                    category.slug,
                    category.meta_description,
                    category.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::Category, &category.id)
    }

    /// Categories, newest first
    pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
        query_all(
            conn,
            "SELECT id, name, slug, meta_description, created_at, updated_at
             FROM categories ORDER BY created_at DESC, id DESC",
            category_from_row,
        )
    }

    // ===== Sub-categories =====

    pub fn insert_sub_category(conn: &Connection, sub_category: &SubCategory) -> Result<()> {
        conn.execute(
            "INSERT INTO sub_categories
                (id, category_id, name, slug, meta_description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                sub_category.id,
                sub_category.category_id,
                sub_category.name,
                sub_category.slug,
                sub_category.meta_description,
                sub_category.created_at.timestamp_millis(),
                sub_category.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_sub_category(conn: &Connection, id: &str) -> Result<Option<SubCategory>> {
        query_one(
            conn,
            "SELECT id, category_id, name, slug, meta_description, created_at, updated_at
             FROM sub_categories WHERE id = ?1",
            id,
            sub_category_from_row,
        )
    }

    /// Write the mutable columns and refresh `updated_at` on `sub_category`
    pub fn update_sub_category(conn: &Connection, sub_category: &mut SubCategory) -> Result<()> {
        sub_category.touch();
        let changed = conn
            .execute(
                "UPDATE sub_categories
                 SET category_id = ?2, name = ?3, slug = ?4, meta_description = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![
                    sub_category.id,
                    sub_category.category_id,
                    sub_category.name,
                    sub_category.slug,
                    sub_category.meta_description,
                    sub_category.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::SubCategory, &sub_category.id)
    }

    /// Sub-categories, newest first
    pub fn list_sub_categories(conn: &Connection) -> Result<Vec<SubCategory>> {
        query_all(
            conn,
            "SELECT id, category_id, name, slug, meta_description, created_at, updated_at
             FROM sub_categories ORDER BY created_at DESC, id DESC",
            sub_category_from_row,
        )
    }

    // ===== Brands =====

    pub fn insert_brand(conn: &Connection, brand: &Brand) -> Result<()> {
        conn.execute(
            "INSERT INTO brands (id, name, localized_name, url, logo) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                brand.id,
                brand.name,
                brand.localized_name,
                brand.url,
                brand.logo
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_brand(conn: &Connection, id: &str) -> Result<Option<Brand>> {
        query_one(
            conn,
            "SELECT id, name, localized_name, url, logo FROM brands WHERE id = ?1",
            id,
            brand_from_row,
        )
    }

    pub fn update_brand(conn: &Connection, brand: &Brand) -> Result<()> {
        let changed = conn
            .execute(
                "UPDATE brands SET name = ?2, localized_name = ?3, url = ?4, logo = ?5
                 WHERE id = ?1",
                params![
                    brand.id,
                    brand.name,
                    brand.localized_name,
                    brand.url,
                    brand.logo
                ],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::Brand, &brand.id)
    }

    /// Brands ordered by id
    pub fn list_brands(conn: &Connection) -> Result<Vec<Brand>> {
        query_all(
            conn,
            "SELECT id, name, localized_name, url, logo FROM brands ORDER BY id",
            brand_from_row,
        )
    }

    // ===== Attributes =====

    pub fn insert_attribute(conn: &Connection, attribute: &Attribute) -> Result<()> {
        conn.execute(
            "INSERT INTO attributes (id, category_id, name) VALUES (?1, ?2, ?3)",
            params![attribute.id, attribute.category_id, attribute.name],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_attribute(conn: &Connection, id: &str) -> Result<Option<Attribute>> {
        query_one(
            conn,
            "SELECT id, category_id, name FROM attributes WHERE id = ?1",
            id,
            attribute_from_row,
        )
    }

    pub fn update_attribute(conn: &Connection, attribute: &Attribute) -> Result<()> {
        let changed = conn
            .execute(
                "UPDATE attributes SET category_id = ?2, name = ?3 WHERE id = ?1",
                params![attribute.id, attribute.category_id, attribute.name],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::Attribute, &attribute.id)
    }

    /// Attributes ordered by their category's creation time
    ///
    /// Attributes without a category sort first; ties are broken by id.
    pub fn list_attributes(conn: &Connection) -> Result<Vec<Attribute>> {
        query_all(
            conn,
            "SELECT a.id, a.category_id, a.name
             FROM attributes a
             LEFT JOIN categories c ON c.id = a.category_id
             ORDER BY c.created_at ASC, a.id ASC",
            attribute_from_row,
        )
    }

    // ===== Products =====

    /// Insert a product; the discount rule is not checked
    pub fn insert_product(conn: &Connection, product: &Product) -> Result<()> {
        conn.execute(
            "INSERT INTO products
                (id, owner_id, name, sub_category_id, brand_id, count, price, off_price,
                 is_off, is_stock, description, meta_description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                product.id,
                product.owner_id,
                product.name,
                product.sub_category_id,
                product.brand_id,
                product.count,
                product.price.to_string(),
                product.off_price.to_string(),
                product.is_off,
                product.is_stock,
                product.description,
                product.meta_description,
                product.created_at.timestamp_millis(),
                product.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_product(conn: &Connection, id: &str) -> Result<Option<Product>> {
        query_one(
            conn,
            "SELECT id, owner_id, name, sub_category_id, brand_id, count, price, off_price,
                    is_off, is_stock, description, meta_description, created_at, updated_at
             FROM products WHERE id = ?1",
            id,
            product_from_row,
        )
    }

    /// Write the mutable columns and refresh `updated_at` on `product`
    pub fn update_product(conn: &Connection, product: &mut Product) -> Result<()> {
        product.touch();
        let changed = conn
            .execute(
                "UPDATE products
                 SET owner_id = ?2, name = ?3, sub_category_id = ?4, brand_id = ?5, count = ?6,
                     price = ?7, off_price = ?8, is_off = ?9, is_stock = ?10,
                     description = ?11, meta_description = ?12, updated_at = ?13
                 WHERE id = ?1",
                params![
                    product.id,
                    product.owner_id,
                    product.name,
                    product.sub_category_id,
                    product.brand_id,
                    product.count,
                    product.price.to_string(),
                    product.off_price.to_string(),
                    product.is_off,
                    product.is_stock,
                    product.description,
                    product.meta_description,
                    product.updated_at.timestamp_millis(),
                ],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::Product, &product.id)
    }

    /// Products, newest first
    pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
        query_all(
            conn,
            "SELECT id, owner_id, name, sub_category_id, brand_id, count, price, off_price,
                    is_off, is_stock, description, meta_description, created_at, updated_at
             FROM products ORDER BY created_at DESC, id DESC",
            product_from_row,
        )
    }

    // ===== Product attribute values =====

    pub fn insert_attribute_value(conn: &Connection, value: &ProductAttributeValue) -> Result<()> {
        conn.execute(
            "INSERT INTO product_attribute_values (id, attribute_id, product_id, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![value.id, value.attribute_id, value.product_id, value.value],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_attribute_value(
        conn: &Connection,
        id: &str,
    ) -> Result<Option<ProductAttributeValue>> {
        query_one(
            conn,
            "SELECT id, attribute_id, product_id, value
             FROM product_attribute_values WHERE id = ?1",
            id,
            attribute_value_from_row,
        )
    }

    pub fn update_attribute_value(conn: &Connection, value: &ProductAttributeValue) -> Result<()> {
        let changed = conn
            .execute(
                "UPDATE product_attribute_values
                 SET attribute_id = ?2, product_id = ?3, value = ?4
                 WHERE id = ?1",
                params![value.id, value.attribute_id, value.product_id, value.value],
            )
            .map_err(from_rusqlite)?;
        ensure_updated(changed, EntityKind::ProductAttributeValue, &value.id)
    }

    /// Attribute values ordered by id
    pub fn list_attribute_values(conn: &Connection) -> Result<Vec<ProductAttributeValue>> {
        query_all(
            conn,
            "SELECT id, attribute_id, product_id, value
             FROM product_attribute_values ORDER BY id",
            attribute_value_from_row,
        )
    }

    // ===== Counting and deletion =====

    pub fn count(conn: &Connection, entity: EntityKind) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table_name());
        conn.query_row(&sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(from_rusqlite)
    }

    /// Delete one row of any table, applying its delete policies
    ///
    /// Runs in one transaction: protect check, cascaded deletes, nullify
    /// updates, then the row itself. Nothing is written when the protect
    /// check fails.
    pub fn delete(conn: &mut Connection, entity: EntityKind, id: &str) -> Result<DeletePlan> {
        log_op_start!("delete_row", entity = %entity, entity_id = id);
        let start = Instant::now();

        let result = Self::delete_in_tx(conn, entity, id);

        match &result {
            Ok(plan) => {
                log_op_end!(
                    "delete_row",
                    duration_ms = start.elapsed().as_millis() as u64,
                    entity_id = id,
                    cascaded = plan.cascaded(),
                    nullified = plan.nullified()
                );
            }
            Err(e) => {
                log_op_error!(
                    "delete_row",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    entity_id = id
                );
            }
        }
        result
    }

    fn delete_in_tx(conn: &mut Connection, entity: EntityKind, id: &str) -> Result<DeletePlan> {
        let tx = conn.transaction().map_err(from_rusqlite)?;

        if !row_exists(&tx, entity, id)? {
            return Err(not_found(entity, id));
        }
        let plan = plan_delete(&SqlDependents(&tx), entity, id)?;

        for (child, child_id) in &plan.cascade {
            delete_row(&tx, *child, child_id)?;
        }
        for (fk, child_id) in &plan.nullify {
            let sql = format!(
                "UPDATE {} SET {} = NULL WHERE id = ?1",
                fk.child().table_name(),
                fk.column()
            );
            tx.execute(&sql, [child_id]).map_err(from_rusqlite)?;
        }
        let (root, root_id) = &plan.root;
        delete_row(&tx, *root, root_id)?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(plan)
    }
}

fn delete_row(conn: &Connection, entity: EntityKind, id: &str) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", entity.table_name());
    conn.execute(&sql, [id]).map_err(from_rusqlite)?;
    Ok(())
}
