use super::store::{check_unique, Store};
use super::{delete_record, logged, DeletePlan};
use crate::errors::Result;
use crate::model::{EntityKind, ForeignKey, NewSubCategory, SubCategory};

fn check_constraints(store: &Store, sub_category: &SubCategory) -> Result<()> {
    store.check_reference(
        ForeignKey::SubCategoryCategory,
        sub_category.category_id.as_deref(),
    )?;
    check_unique(
        store
            .sub_categories
            .values()
            .map(|s| (s.id.as_str(), s.name.as_str())),
        &sub_category.id,
        EntityKind::SubCategory,
        "name",
        &sub_category.name,
    )?;
    check_unique(
        store
            .sub_categories
            .values()
            .map(|s| (s.id.as_str(), s.slug.as_str())),
        &sub_category.id,
        EntityKind::SubCategory,
        "slug",
        &sub_category.slug,
    )
}

/// Create a sub-category with a fresh id
///
/// # Errors
///
/// * `DanglingReference` - the category does not exist
/// * `UniqueViolation` - another sub-category already uses the name or slug
pub fn create_sub_category(store: &mut Store, new: NewSubCategory) -> Result<String> {
    add_sub_category(store, SubCategory::create(new))
}

/// Insert a fully built sub-category, keeping its id and timestamps
///
/// # Errors
///
/// * `AlreadyExists` - the id is taken
/// * `DanglingReference` - the category does not exist
/// * `UniqueViolation` - another sub-category already uses the name or slug
pub fn add_sub_category(store: &mut Store, sub_category: SubCategory) -> Result<String> {
    logged("create_sub_category", || {
        store.check_new_id(EntityKind::SubCategory, &sub_category.id)?;
        check_constraints(store, &sub_category)?;
        let id = sub_category.id.clone();
        store.insert_sub_category(sub_category);
        Ok(id)
    })
}

/// # Errors
///
/// * `NotFound` - no sub-category has this id
pub fn read_sub_category<'a>(store: &'a Store, id: &str) -> Result<&'a SubCategory> {
    store.get_sub_category(id)
}

/// Replace the stored fields of an existing sub-category
///
/// # Errors
///
/// * `NotFound` - no sub-category has this id
/// * `DanglingReference` - the category does not exist
/// * `UniqueViolation` - another sub-category already uses the name or slug
pub fn update_sub_category(store: &mut Store, mut sub_category: SubCategory) -> Result<()> {
    logged("update_sub_category", || {
        sub_category.created_at = store.get_sub_category(&sub_category.id)?.created_at;
        check_constraints(store, &sub_category)?;
        sub_category.touch();
        store.insert_sub_category(sub_category);
        Ok(())
    })
}

/// Delete a sub-category; products lose the link
///
/// # Errors
///
/// * `NotFound` - no sub-category has this id
pub fn delete_sub_category(store: &mut Store, id: &str) -> Result<DeletePlan> {
    delete_record(store, "delete_sub_category", EntityKind::SubCategory, id)
}

/// Sub-categories, newest first
pub fn list_sub_categories(store: &Store) -> Vec<&SubCategory> {
    store.list_sub_categories()
}

/// Sub-categories linked to `category_id`, newest first
pub fn list_sub_categories_of<'a>(store: &'a Store, category_id: &str) -> Vec<&'a SubCategory> {
    store
        .list_sub_categories()
        .into_iter()
        .filter(|s| s.category_id.as_deref() == Some(category_id))
        .collect()
}
