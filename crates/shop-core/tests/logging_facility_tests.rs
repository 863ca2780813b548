#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use shop_core::errors::ShopError;
use shop_core::logging_facility::test_capture::init_test_capture;
use shop_core::model::EntityKind;
use shop_core::ops::{user_ops, Store};
use shop_core::{log_op_end, log_op_error, log_op_start};
use shop_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, product_id = "p1");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("product_id"), Some("p1"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ShopError::NotFound {
        entity: EntityKind::Category,
        id: "c1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(events[0].field("err_kind"), Some("NotFound"));
}

#[test]
fn test_protected_delete_logs_end_error() {
    // GIVEN a user owning a product
    let capture = init_test_capture();
    let mut store = Store::new();
    let catalog = seed_catalog(&mut store);

    // WHEN the delete is refused
    assert!(user_ops::delete_user(&mut store, &catalog.owner).is_err());

    // THEN one end_error event for this user carries the protected code
    let failures: Vec<_> = capture
        .events_for("delete_user")
        .into_iter()
        .filter(|e| e.field("entity_id") == Some(catalog.owner.as_str()))
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].field(FIELD_ERR_CODE), Some("ERR_PROTECTED"));
}

#[test]
fn test_cascading_delete_logs_counts() {
    let capture = init_test_capture();
    let mut store = Store::new();
    let catalog = seed_catalog(&mut store);

    shop_core::ops::attribute_ops::delete_attribute(&mut store, &catalog.attribute).unwrap();

    let ends: Vec<_> = capture
        .events_for("delete_attribute")
        .into_iter()
        .filter(|e| e.field("entity_id") == Some(catalog.attribute.as_str()))
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("cascaded"), Some("1"));
    assert_eq!(ends[0].field("nullified"), Some("0"));
}

#[test]
fn test_write_operations_emit_start_and_end() {
    let capture = init_test_capture();
    let mut store = Store::new();
    create_test_brand(&mut store, "Apple");

    capture.assert_event_exists("create_brand", EVENT_START);
    capture.assert_event_exists("create_brand", EVENT_END);
}
