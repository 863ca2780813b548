use chrono::{DateTime, SubsecRound, Utc};

pub mod attribute;
pub mod attribute_value;
pub mod brand;
pub mod category;
pub mod entity;
pub mod product;
pub mod relation;
pub mod sub_category;
pub mod user;

pub use attribute::{Attribute, NewAttribute};
pub use attribute_value::{NewProductAttributeValue, ProductAttributeValue};
pub use brand::{Brand, NewBrand, BRAND_LOGO_DIR};
pub use category::{Category, NewCategory};
pub use entity::EntityKind;
pub use product::{NewProduct, Product};
pub use relation::{ForeignKey, OnDelete};
pub use sub_category::{NewSubCategory, SubCategory};
pub use user::{NewUser, User};

/// Placeholder shown in labels when an optional category link is empty
pub const NO_CATEGORY: &str = "No Category";

/// Placeholder shown in product labels when the product has no sub-category
pub const NO_SUB_CATEGORY: &str = "No SubCategory";

/// Generate a fresh record identifier (UUIDv7, time-ordered)
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Current time truncated to the millisecond precision rows are stored with
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
