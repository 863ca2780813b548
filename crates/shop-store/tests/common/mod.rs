use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use shop_core::model::{
    Attribute, Brand, Category, Product, ProductAttributeValue, SubCategory, User,
};
use shop_store::SqliteRepo;

/// In-memory database with foreign keys on and every migration applied
#[allow(dead_code)]
pub fn setup_db() -> Connection {
    let mut conn = shop_store::db::open_in_memory().expect("open in-memory db");
    shop_store::migrations::apply_migrations(&mut conn).expect("apply migrations");
    conn
}

/// Millisecond-precision timestamp, stable across a database round trip
#[allow(dead_code)]
pub fn at(minutes: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000 + minutes * 60_000).expect("valid time")
}

#[allow(dead_code)]
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

#[allow(dead_code)]
pub fn insert_user(conn: &Connection, id: &str) -> User {
    let mut user = User::new(id.to_string(), format!("user-{}", id));
    user.created_at = at(0);
    SqliteRepo::insert_user(conn, &user).expect("insert user");
    user
}

#[allow(dead_code)]
pub fn insert_category(conn: &Connection, id: &str, minutes: i64) -> Category {
    let mut category = Category::new(
        id.to_string(),
        format!("Category {}", id),
        id.to_string(),
        "Category description".to_string(),
    );
    category.created_at = at(minutes);
    category.updated_at = at(minutes);
    SqliteRepo::insert_category(conn, &category).expect("insert category");
    category
}

#[allow(dead_code)]
pub fn insert_sub_category(conn: &Connection, id: &str, category_id: Option<&str>) -> SubCategory {
    let mut sub_category = SubCategory::new(
        id.to_string(),
        format!("Sub-category {}", id),
        id.to_string(),
        "Sub-category description".to_string(),
    );
    sub_category.category_id = category_id.map(str::to_string);
    sub_category.created_at = at(0);
    sub_category.updated_at = at(0);
    SqliteRepo::insert_sub_category(conn, &sub_category).expect("insert sub-category");
    sub_category
}

#[allow(dead_code)]
pub fn insert_brand(conn: &Connection, id: &str) -> Brand {
    let brand = Brand::new(id.to_string(), format!("Brand {}", id), format!("برند {}", id));
    SqliteRepo::insert_brand(conn, &brand).expect("insert brand");
    brand
}

#[allow(dead_code)]
pub fn insert_attribute(conn: &Connection, id: &str, category_id: Option<&str>) -> Attribute {
    let attribute = Attribute::new(
        id.to_string(),
        category_id.map(str::to_string),
        format!("Attribute {}", id),
    );
    SqliteRepo::insert_attribute(conn, &attribute).expect("insert attribute");
    attribute
}

#[allow(dead_code)]
pub fn insert_product(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    sub_category_id: Option<&str>,
    brand_id: Option<&str>,
) -> Product {
    let mut product = Product::new(
        id.to_string(),
        owner_id.to_string(),
        format!("Product {}", id),
        dec("100.00"),
        dec("90.00"),
    );
    product.sub_category_id = sub_category_id.map(str::to_string);
    product.brand_id = brand_id.map(str::to_string);
    product.description = "Full product description".to_string();
    product.meta_description = "Product description".to_string();
    product.created_at = at(0);
    product.updated_at = at(0);
    SqliteRepo::insert_product(conn, &product).expect("insert product");
    product
}

#[allow(dead_code)]
pub fn insert_value(
    conn: &Connection,
    id: &str,
    attribute_id: &str,
    product_id: &str,
) -> ProductAttributeValue {
    let value = ProductAttributeValue::new(
        id.to_string(),
        attribute_id.to_string(),
        product_id.to_string(),
        "Black".to_string(),
    );
    SqliteRepo::insert_attribute_value(conn, &value).expect("insert value");
    value
}

/// One row per table, every link populated
///
/// Ids: user `u1`, category `c1`, sub-category `s1`, brand `b1`,
/// attribute `a1`, product `p1`, value `v1`.
#[allow(dead_code)]
pub fn seed(conn: &Connection) {
    insert_user(conn, "u1");
    insert_category(conn, "c1", 0);
    insert_sub_category(conn, "s1", Some("c1"));
    insert_brand(conn, "b1");
    insert_attribute(conn, "a1", Some("c1"));
    insert_product(conn, "p1", "u1", Some("s1"), Some("b1"));
    insert_value(conn, "v1", "a1", "p1");
}
