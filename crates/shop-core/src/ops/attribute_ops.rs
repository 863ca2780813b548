use super::store::Store;
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{Attribute, EntityKind, ForeignKey, NewAttribute};

/// # Errors
///
/// * `DanglingReference` - the category does not exist
pub fn create_attribute(store: &mut Store, new: NewAttribute) -> Result<String> {
    add_attribute(store, Attribute::create(new))
}

/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `DanglingReference` - the category does not exist
pub fn add_attribute(store: &mut Store, attribute: Attribute) -> Result<String> {
    logged("create_attribute", || {
        store.check_new_id(EntityKind::Attribute, &attribute.id)?;
        store.check_reference(ForeignKey::AttributeCategory, attribute.category_id.as_deref())?;
        let id = attribute.id.clone();
        store.insert_attribute(attribute);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no attribute has this id
pub fn read_attribute<'a>(store: &'a Store, id: &str) -> Result<&'a Attribute> {
    store.get_attribute(id)
}

/// # Errors
///
/// * `NotFound` - no attribute has this id
/// * `DanglingReference` - the category does not exist
pub fn update_attribute(store: &mut Store, attribute: Attribute) -> Result<()> {
    logged("update_attribute", || {
        store.get_attribute(&attribute.id)?;
        store.check_reference(ForeignKey::AttributeCategory, attribute.category_id.as_deref())?;
        store.insert_attribute(attribute);
        Ok(())
    })
}

/// Delete an attribute together with every value recorded for it
///
/// # Errors
///
/// * `NotFound` - no attribute has this id
pub fn delete_attribute(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_attribute", EntityKind::Attribute, id)
}

/// Attributes ordered by their category's creation time
pub fn list_attributes(store: &Store) -> Vec<&Attribute> {
    store.list_attributes()
}

/// Attributes linked to `category_id`
pub fn list_attributes_of<'a>(store: &'a Store, category_id: &str) -> Vec<&'a Attribute> {
    store
        .list_attributes()
        .into_iter()
        .filter(|a| a.category_id.as_deref() == Some(category_id))
        .collect()
}
