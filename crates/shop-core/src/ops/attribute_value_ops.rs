use super::store::Store;
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{EntityKind, ForeignKey, NewProductAttributeValue, ProductAttributeValue};

fn check_references(store: &Store, value: &ProductAttributeValue) -> Result<()> {
    store.check_reference(
        ForeignKey::AttributeValueAttribute,
        Some(value.attribute_id.as_str()),
    )?;
    store.check_reference(
        ForeignKey::AttributeValueProduct,
        Some(value.product_id.as_str()),
    )
}

/// Record a product's value for an attribute
///
/// # Errors
///
/// * `DanglingReference` - the attribute or product does not exist
pub fn create_attribute_value(store: &mut Store, new: NewProductAttributeValue) -> Result<String> {
    add_attribute_value(store, ProductAttributeValue::create(new))
}

/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `DanglingReference` - the attribute or product does not exist
pub fn add_attribute_value(store: &mut Store, value: ProductAttributeValue) -> Result<String> {
    logged("create_attribute_value", || {
        store.check_new_id(EntityKind::ProductAttributeValue, &value.id)?;
        check_references(store, &value)?;
        let id = value.id.clone();
        store.insert_attribute_value(value);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no attribute value has this id
pub fn read_attribute_value<'a>(store: &'a Store, id: &str) -> Result<&'a ProductAttributeValue> {
    store.get_attribute_value(id)
}

/// # Errors
///
/// * `NotFound` - no attribute value has this id
/// * `DanglingReference` - the attribute or product does not exist
pub fn update_attribute_value(store: &mut Store, value: ProductAttributeValue) -> Result<()> {
    logged("update_attribute_value", || {
        store.get_attribute_value(&value.id)?;
        check_references(store, &value)?;
        store.insert_attribute_value(value);
        Ok(())
    })
}

/// # Errors
///
/// * `NotFound` - no attribute value has this id
pub fn delete_attribute_value(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(
        store,
        "delete_attribute_value",
        EntityKind::ProductAttributeValue,
        id,
    )
}

pub fn list_attribute_values(store: &Store) -> Vec<&ProductAttributeValue> {
    store.list_attribute_values()
}

/// Values recorded for one product (its `product_values`), by id
pub fn list_values_of_product<'a>(
    store: &'a Store,
    product_id: &str,
) -> Vec<&'a ProductAttributeValue> {
    store
        .list_attribute_values()
        .into_iter()
        .filter(|v| v.product_id == product_id)
        .collect()
}
