use super::store::{check_unique, Store};
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{Category, EntityKind, NewCategory};

fn check_unique_columns(store: &Store, category: &Category) -> Result<()> {
    check_unique(
        store
            .categories
            .values()
            .map(|c| (c.id.as_str(), c.name.as_str())),
        &category.id,
        EntityKind::Category,
        "name",
        &category.name,
    )?;
    check_unique(
        store
            .categories
            .values()
            .map(|c| (c.id.as_str(), c.slug.as_str())),
        &category.id,
        EntityKind::Category,
        "slug",
        &category.slug,
    )
}

/// Create a category with a fresh id
///
/// # Errors
///
/// * `UniqueViolation` - another category already uses the name or slug
pub fn create_category(store: &mut Store, new: NewCategory) -> Result<String> {
    add_category(store, Category::create(new))
}

/// Insert a fully built category, keeping its id and timestamps
///
/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `UniqueViolation` - another category already uses the name or slug
pub fn add_category(store: &mut Store, category: Category) -> Result<String> {
    logged("create_category", || {
        store.check_new_id(EntityKind::Category, &category.id)?;
        check_unique_columns(store, &category)?;
        let id = category.id.clone();
        store.insert_category(category);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no category has this id
pub fn read_category<'a>(store: &'a Store, id: &str) -> Result<&'a Category> {
    store.get_category(id)
}

/// Replace the stored fields of an existing category
///
/// `created_at` is kept from the stored row and `updated_at` is refreshed.
///
/// # Errors
///
/// * `NotFound` - no category has this id
/// * `UniqueViolation` - another category already uses the name or slug
pub fn update_category(store: &mut Store, mut category: Category) -> Result<()> {
    logged("update_category", || {
        category.created_at = store.get_category(&category.id)?.created_at;
        check_unique_columns(store, &category)?;
        category.touch();
        store.insert_category(category);
        Ok(())
    })
}

/// Delete a category; its sub-categories and attributes lose the link
///
/// # Errors
///
/// * `NotFound` - no category has this id
pub fn delete_category(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_category", EntityKind::Category, id)
}

/// Categories, newest first
pub fn list_categories(store: &Store) -> Vec<&Category> {
    store.list_categories()
}
