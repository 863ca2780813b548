use rust_decimal::Decimal;
use shop_core::model::{
    NewAttribute, NewBrand, NewCategory, NewProduct, NewProductAttributeValue, NewSubCategory,
    NewUser,
};
use shop_core::ops::{
    attribute_ops, attribute_value_ops, brand_ops, category_ops, product_ops, sub_category_ops,
    user_ops, Store,
};

/// Parse a decimal literal such as "100.00"
#[allow(dead_code)]
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

#[allow(dead_code)]
pub fn create_test_user(store: &mut Store, username: &str) -> String {
    user_ops::create_user(
        store,
        NewUser {
            username: username.to_string(),
        },
    )
    .expect("Should create user")
}

/// Category whose slug is derived from the name
#[allow(dead_code)]
pub fn create_test_category(store: &mut Store, name: &str) -> String {
    category_ops::create_category(
        store,
        NewCategory {
            name: name.to_string(),
            slug: shop_core::rules::slug::slugify(name),
            meta_description: format!("All about {}", name),
        },
    )
    .expect("Should create category")
}

#[allow(dead_code)]
pub fn create_test_sub_category(
    store: &mut Store,
    category_id: Option<&str>,
    name: &str,
) -> String {
    sub_category_ops::create_sub_category(
        store,
        NewSubCategory {
            category_id: category_id.map(str::to_string),
            name: name.to_string(),
            slug: shop_core::rules::slug::slugify(name),
            meta_description: format!("All about {}", name),
        },
    )
    .expect("Should create sub-category")
}

#[allow(dead_code)]
pub fn create_test_brand(store: &mut Store, name: &str) -> String {
    brand_ops::create_brand(
        store,
        NewBrand {
            name: name.to_string(),
            localized_name: name.to_string(),
            ..NewBrand::default()
        },
    )
    .expect("Should create brand")
}

#[allow(dead_code)]
pub fn create_test_attribute(store: &mut Store, category_id: Option<&str>, name: &str) -> String {
    attribute_ops::create_attribute(
        store,
        NewAttribute {
            category_id: category_id.map(str::to_string),
            name: name.to_string(),
        },
    )
    .expect("Should create attribute")
}

/// In-stock, fully valid product priced 100.00 with a 90.00 discount price
#[allow(dead_code)]
pub fn create_test_product(
    store: &mut Store,
    owner_id: &str,
    sub_category_id: Option<&str>,
    brand_id: Option<&str>,
    name: &str,
) -> String {
    product_ops::create_product(
        store,
        NewProduct {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            sub_category_id: sub_category_id.map(str::to_string),
            brand_id: brand_id.map(str::to_string),
            count: 5,
            price: dec("100.00"),
            off_price: dec("90.00"),
            is_stock: true,
            description: format!("{} with charger", name),
            meta_description: format!("Buy {}", name),
            ..NewProduct::default()
        },
    )
    .expect("Should create product")
}

#[allow(dead_code)]
pub fn create_test_value(
    store: &mut Store,
    attribute_id: &str,
    product_id: &str,
    value: &str,
) -> String {
    attribute_value_ops::create_attribute_value(
        store,
        NewProductAttributeValue {
            attribute_id: attribute_id.to_string(),
            product_id: product_id.to_string(),
            value: value.to_string(),
        },
    )
    .expect("Should create attribute value")
}

/// Ids of a small but complete catalog
#[allow(dead_code)]
pub struct Catalog {
    pub owner: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub attribute: String,
    pub product: String,
    pub value: String,
}

#[allow(dead_code)]
pub fn seed_catalog(store: &mut Store) -> Catalog {
    let owner = create_test_user(store, "seller");
    let category = create_test_category(store, "Mobile");
    let sub_category = create_test_sub_category(store, Some(&category), "Smartphones");
    let brand = create_test_brand(store, "Samsung");
    let attribute = create_test_attribute(store, Some(&category), "Color");
    let product = create_test_product(
        store,
        &owner,
        Some(&sub_category),
        Some(&brand),
        "Galaxy S24",
    );
    let value = create_test_value(store, &attribute, &product, "Black");
    Catalog {
        owner,
        category,
        sub_category,
        brand,
        attribute,
        product,
        value,
    }
}
