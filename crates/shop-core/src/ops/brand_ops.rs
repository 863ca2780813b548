use super::store::Store;
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{Brand, EntityKind, NewBrand};

/// # Errors
///
/// Infallible today; kept fallible like the other create operations.
pub fn create_brand(store: &mut Store, new: NewBrand) -> Result<String> {
    add_brand(store, Brand::create(new))
}

/// # Errors
///
/// * `AlreadyExists` - the id is taken
pub fn add_brand(store: &mut Store, brand: Brand) -> Result<String> {
    logged("create_brand", || {
        store.check_new_id(EntityKind::Brand, &brand.id)?;
        let id = brand.id.clone();
        store.insert_brand(brand);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no brand has this id
pub fn read_brand<'a>(store: &'a Store, id: &str) -> Result<&'a Brand> {
    store.get_brand(id)
}

/// # Errors
///
/// * `NotFound` - no brand has this id
pub fn update_brand(store: &mut Store, brand: Brand) -> Result<()> {
    logged("update_brand", || {
        store.get_brand(&brand.id)?;
        store.insert_brand(brand);
        Ok(())
    })
}

/// Delete a brand; its products lose the link
///
/// # Errors
///
/// * `NotFound` - no brand has this id
pub fn delete_brand(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_brand", EntityKind::Brand, id)
}

pub fn list_brands(store: &Store) -> Vec<&Brand> {
    store.list_brands()
}
