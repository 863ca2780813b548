#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use shop_core::errors::ExErrorKind;
use shop_core::model::EntityKind;
use shop_store::SqliteRepo;

#[test]
fn test_delete_category_nullifies_children() {
    // Given: A category with one sub-category and one attribute
    let mut conn = setup_db();
    seed(&conn);

    // When: The category is deleted
    let plan = SqliteRepo::delete(&mut conn, EntityKind::Category, "c1").unwrap();

    // Then: Both children remain with a null link
    assert_eq!(plan.nullified(), 2);
    let sub_category = SqliteRepo::get_sub_category(&conn, "s1").unwrap().unwrap();
    assert!(sub_category.category_id.is_none());
    let attribute = SqliteRepo::get_attribute(&conn, "a1").unwrap().unwrap();
    assert!(attribute.category_id.is_none());
    assert!(SqliteRepo::get_category(&conn, "c1").unwrap().is_none());
}

#[test]
fn test_delete_sub_category_and_brand_nullify_product() {
    let mut conn = setup_db();
    seed(&conn);

    SqliteRepo::delete(&mut conn, EntityKind::SubCategory, "s1").unwrap();
    SqliteRepo::delete(&mut conn, EntityKind::Brand, "b1").unwrap();

    let product = SqliteRepo::get_product(&conn, "p1").unwrap().unwrap();
    assert!(product.sub_category_id.is_none());
    assert!(product.brand_id.is_none());
}

#[test]
fn test_delete_attribute_cascades_values() {
    let mut conn = setup_db();
    seed(&conn);
    insert_product(&conn, "p2", "u1", None, None);
    insert_value(&conn, "v2", "a1", "p2");

    let plan = SqliteRepo::delete(&mut conn, EntityKind::Attribute, "a1").unwrap();

    assert_eq!(plan.cascaded(), 2);
    assert_eq!(
        SqliteRepo::count(&conn, EntityKind::ProductAttributeValue).unwrap(),
        0
    );
    assert_eq!(SqliteRepo::count(&conn, EntityKind::Product).unwrap(), 2);
}

#[test]
fn test_delete_product_cascades_values() {
    let mut conn = setup_db();
    seed(&conn);

    SqliteRepo::delete(&mut conn, EntityKind::Product, "p1").unwrap();

    assert!(SqliteRepo::get_attribute_value(&conn, "v1").unwrap().is_none());
    assert!(SqliteRepo::get_attribute(&conn, "a1").unwrap().is_some());
}

#[test]
fn test_delete_user_with_products_is_protected() {
    // Given: A user who owns a product
    let mut conn = setup_db();
    seed(&conn);

    // When: Deleting the user
    let err = SqliteRepo::delete(&mut conn, EntityKind::User, "u1").unwrap_err();

    // Then: The delete is refused and the transaction leaves everything intact
    assert_eq!(err.kind(), ExErrorKind::Protected);
    assert_eq!(err.entity_id(), Some("u1"));
    assert!(SqliteRepo::get_user(&conn, "u1").unwrap().is_some());
    assert!(SqliteRepo::get_product(&conn, "p1").unwrap().is_some());
}

#[test]
fn test_raw_delete_of_owner_is_rejected_by_schema() {
    let conn = setup_db();
    seed(&conn);

    let err = conn
        .execute("DELETE FROM users WHERE id = 'u1'", [])
        .map_err(shop_store::errors::from_rusqlite)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ForeignKeyViolation);
}

#[test]
fn test_raw_delete_of_category_nullifies_via_schema() {
    // The declared ON DELETE actions back up the explicit steps
    let conn = setup_db();
    seed(&conn);

    conn.execute("DELETE FROM categories WHERE id = 'c1'", [])
        .unwrap();

    let sub_category = SqliteRepo::get_sub_category(&conn, "s1").unwrap().unwrap();
    assert!(sub_category.category_id.is_none());
}

#[test]
fn test_delete_missing_row_is_not_found() {
    let mut conn = setup_db();

    let err = SqliteRepo::delete(&mut conn, EntityKind::Product, "missing").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
