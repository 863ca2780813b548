use super::store::Store;
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{EntityKind, ForeignKey, NewProduct, Product};

/// Foreign keys only; the discount rule is left to `Product::clean`
fn check_references(store: &Store, product: &Product) -> Result<()> {
    store.check_reference(ForeignKey::ProductOwner, Some(product.owner_id.as_str()))?;
    store.check_reference(
        ForeignKey::ProductSubCategory,
        product.sub_category_id.as_deref(),
    )?;
    store.check_reference(ForeignKey::ProductBrand, product.brand_id.as_deref())
}

/// Create a product with a fresh id
///
/// The product is stored even when it breaks the discount rule.
///
/// # Errors
///
/// * `DanglingReference` - the owner, sub-category or brand does not exist
pub fn create_product(store: &mut Store, new: NewProduct) -> Result<String> {
    add_product(store, Product::create(new))
}

/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `DanglingReference` - the owner, sub-category or brand does not exist
pub fn add_product(store: &mut Store, product: Product) -> Result<String> {
    logged("create_product", || {
        store.check_new_id(EntityKind::Product, &product.id)?;
        check_references(store, &product)?;
        let id = product.id.clone();
        store.insert_product(product);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no product has this id
pub fn read_product<'a>(store: &'a Store, id: &str) -> Result<&'a Product> {
    store.get_product(id)
}

/// Replace the stored fields of an existing product
///
/// # Errors
///
/// * `NotFound` - no product has this id
/// * `DanglingReference` - the owner, sub-category or brand does not exist
pub fn update_product(store: &mut Store, mut product: Product) -> Result<()> {
    logged("update_product", || {
        product.created_at = store.get_product(&product.id)?.created_at;
        check_references(store, &product)?;
        product.touch();
        store.insert_product(product);
        Ok(())
    })
}

/// Delete a product together with its attribute values
///
/// # Errors
///
/// * `NotFound` - no product has this id
pub fn delete_product(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_product", EntityKind::Product, id)
}

/// Products, newest first
pub fn list_products(store: &Store) -> Vec<&Product> {
    store.list_products()
}

/// Products owned by `owner_id`, newest first
pub fn list_products_of_owner<'a>(store: &'a Store, owner_id: &str) -> Vec<&'a Product> {
    store
        .list_products()
        .into_iter()
        .filter(|p| p.owner_id == owner_id)
        .collect()
}
