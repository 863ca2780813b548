//! Human-readable labels resolved through the store's links

use super::store::Store;
use crate::errors::Result;
use crate::model::Category;

fn linked_category<'a>(store: &'a Store, category_id: Option<&str>) -> Option<&'a Category> {
    category_id.and_then(|id| store.categories.get(id))
}

/// `"{name} ({category})"`, or `"{name} (No Category)"` when unlinked
///
/// # Errors
///
/// * `NotFound` - no sub-category has this id
pub fn sub_category_label(store: &Store, id: &str) -> Result<String> {
    let sub_category = store.get_sub_category(id)?;
    Ok(sub_category.label(linked_category(store, sub_category.category_id.as_deref())))
}

/// `"{name} ({category})"`, or `"{name} (No Category)"` when unlinked
///
/// # Errors
///
/// * `NotFound` - no attribute has this id
pub fn attribute_label(store: &Store, id: &str) -> Result<String> {
    let attribute = store.get_attribute(id)?;
    Ok(attribute.label(linked_category(store, attribute.category_id.as_deref())))
}

/// Stock marker, name and the category reached through the sub-category
///
/// # Errors
///
/// * `NotFound` - no product has this id
pub fn product_label(store: &Store, id: &str) -> Result<String> {
    let product = store.get_product(id)?;
    let sub_category = product
        .sub_category_id
        .as_deref()
        .and_then(|id| store.sub_categories.get(id));
    let category = sub_category.and_then(|s| linked_category(store, s.category_id.as_deref()));
    Ok(product.label(sub_category, category))
}
