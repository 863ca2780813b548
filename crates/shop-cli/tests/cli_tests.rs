//! shopctl integration tests
//!
//! Each test runs the binary against a scratch database file.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn shopctl(dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_shopctl");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn migrated_db(dir: &TempDir) -> PathBuf {
    let db_path = dir.path().join("shop.db");
    let output = shopctl(dir, &["--db", db_path.to_str().unwrap(), "migrate"]);
    assert!(output.status.success(), "migrate failed: {}", stderr(&output));
    db_path
}

/// One category tree with two products; "Galaxy S24" is the newer one
fn seed(db_path: &Path) {
    let conn = Connection::open(db_path).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO users (id, username, created_at) VALUES ('u1', 'seller', 0);

        INSERT INTO categories (id, name, slug, meta_description, created_at, updated_at)
        VALUES ('c1', 'Mobile', 'mobile', 'Phones and tablets', 1000, 1000);

        INSERT INTO sub_categories
            (id, category_id, name, slug, meta_description, created_at, updated_at)
        VALUES ('s1', 'c1', 'Smartphones', 'smartphones', 'Smartphones', 2000, 2000);

        INSERT INTO brands (id, name, localized_name, url, logo)
        VALUES ('b1', 'Samsung', 'Samsung Electronics', 'https://www.samsung.com', NULL);

        INSERT INTO attributes (id, category_id, name) VALUES ('a1', 'c1', 'Color');

        INSERT INTO products
            (id, owner_id, name, sub_category_id, brand_id, count, price, off_price,
             is_off, is_stock, description, meta_description, created_at, updated_at)
        VALUES ('p1', 'u1', 'Galaxy S23', 's1', 'b1', 0, '100.00', '90.00', 0, 0,
                'Dual SIM', 'Last year', 3000, 3000),
               ('p2', 'u1', 'Galaxy S24', NULL, 'b1', 4, '120.00', '110.00', 1, 1,
                'Titanium frame', 'Flagship', 4000, 4000);

        INSERT INTO product_attribute_values (id, attribute_id, product_id, value)
        VALUES ('v1', 'a1', 'p1', 'Black');
        "#,
    )
    .unwrap();
}

#[test]
fn test_migrate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("shop.db");
    let db = db_path.to_str().unwrap();

    let first = shopctl(&dir, &["--db", db, "migrate"]);
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert!(stdout(&first).contains("applied 001_catalog_schema"));
    assert!(db_path.exists());

    let second = shopctl(&dir, &["--db", db, "migrate"]);
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    assert!(stdout(&second).contains("is up to date"));
}

#[test]
fn test_summary_requires_migrated_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fresh.db");
    std::fs::File::create(&db_path).unwrap();

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "summary"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.starts_with("Error: "), "stderr: {}", err);
    assert!(err.contains("pending migrations"), "stderr: {}", err);
}

#[test]
fn test_audit_does_not_create_missing_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("missing.db");

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "audit"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("does not exist"), "stderr: {}", err);
    assert!(!db_path.exists());
    assert!(!dir.path().join("missing.db-wal").exists());
}

#[test]
fn test_errors_carry_request_and_trace_ids() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("missing.db");
    let db = db_path.to_str().unwrap();

    let output = shopctl(&dir, &["--db", db, "--trace-id", "checkout-77", "summary"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("[ERR_INVALID_INPUT] in operation 'open_catalog'"), "stderr: {}", err);
    assert!(err.contains(" [request "), "stderr: {}", err);
    assert!(err.trim_end().ends_with("[trace checkout-77]"), "stderr: {}", err);
}

#[test]
fn test_summary_prints_labels_in_list_order() {
    let dir = TempDir::new().unwrap();
    let db_path = migrated_db(&dir);
    seed(&db_path);

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "summary"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("categories (1)\n  Mobile\n"));
    assert!(out.contains("sub categories (1)\n  Smartphones (Mobile)\n"));
    assert!(out.contains("attributes (1)\n  Color (Mobile)\n"));
    assert!(out.contains("brands (1)\n  Samsung Electronics\n"));
    assert!(out.contains(
        "products (2)\n  🟢 Galaxy S24 (No SubCategory)\n  🔴 Galaxy S23 (Mobile)\n"
    ));
}

#[test]
fn test_summary_single_section() {
    let dir = TempDir::new().unwrap();
    let db_path = migrated_db(&dir);
    seed(&db_path);

    let output = shopctl(
        &dir,
        &["--db", db_path.to_str().unwrap(), "summary", "--only", "sub-categories"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "sub categories (1)\n  Smartphones (Mobile)\n");
}

#[test]
fn test_audit_passes_on_valid_catalog() {
    let dir = TempDir::new().unwrap();
    let db_path = migrated_db(&dir);
    seed(&db_path);

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "audit"]);

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("8 record(s) checked, all valid"));
}

#[test]
fn test_audit_reports_discount_above_price() {
    let dir = TempDir::new().unwrap();
    let db_path = migrated_db(&dir);
    seed(&db_path);
    Connection::open(&db_path)
        .unwrap()
        .execute("UPDATE products SET off_price = '100.00' WHERE id = 'p1'", [])
        .unwrap();

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "audit"]);

    assert!(!output.status.success());
    assert!(stdout(&output)
        .contains("product p1: Discount price must be less than the original price."));
    assert!(stderr(&output).contains("1 of 8 record(s) failed validation"));
}

#[test]
fn test_audit_reports_discount_alongside_field_errors() {
    let dir = TempDir::new().unwrap();
    let db_path = migrated_db(&dir);
    seed(&db_path);
    Connection::open(&db_path)
        .unwrap()
        .execute(
            "UPDATE products SET name = '', description = '', off_price = '130.00' WHERE id = 'p2'",
            [],
        )
        .unwrap();

    let output = shopctl(&dir, &["--db", db_path.to_str().unwrap(), "audit"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("product p2: name: This field cannot be blank."), "stdout: {}", out);
    assert!(out.contains("product p2: description: This field cannot be blank."));
    assert!(out.contains("product p2: Discount price must be less than the original price."));
    assert!(stderr(&output).contains("1 of 8 record(s) failed validation"));
}

#[test]
fn test_config_file_selects_database() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("shopctl.toml");
    std::fs::write(
        &config_path,
        "[database]\npath = \"from-config.db\"\nwal = false\n\n[logging]\nprofile = \"test\"\n",
    )
    .unwrap();

    let output = shopctl(&dir, &["--config", config_path.to_str().unwrap(), "migrate"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("from-config.db").exists());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("shopctl.toml");
    std::fs::write(&config_path, "[logging]\nprofile = \"verbose\"\n").unwrap();

    let output = shopctl(&dir, &["--config", config_path.to_str().unwrap(), "migrate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ERR_CONFIG"));
}
