use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::{Result, ShopError};
use crate::model::{
    Attribute, Brand, Category, EntityKind, ForeignKey, Product, ProductAttributeValue,
    SubCategory, User,
};

/// In-memory catalog keyed by record id
///
/// Mirrors the relational schema: the CRUD operations in the sibling
/// modules enforce the same unique columns, foreign keys and delete
/// policies the database declares. Not thread-safe; designed for
/// single-threaded use.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) users: HashMap<String, User>,
    pub(crate) categories: HashMap<String, Category>,
    pub(crate) sub_categories: HashMap<String, SubCategory>,
    pub(crate) brands: HashMap<String, Brand>,
    pub(crate) attributes: HashMap<String, Attribute>,
    pub(crate) products: HashMap<String, Product>,
    pub(crate) attribute_values: HashMap<String, ProductAttributeValue>,
}

fn not_found(entity: EntityKind, id: &str) -> ShopError {
    ShopError::NotFound {
        entity,
        id: id.to_string(),
    }
}

/// Newest first, ties broken by id descending
fn newest_first(a: (DateTime<Utc>, &str), b: (DateTime<Utc>, &str)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.cmp(a.1))
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record of `entity` with `id` is stored
    pub fn contains(&self, entity: EntityKind, id: &str) -> bool {
        match entity {
            EntityKind::User => self.users.contains_key(id),
            EntityKind::Category => self.categories.contains_key(id),
            EntityKind::SubCategory => self.sub_categories.contains_key(id),
            EntityKind::Brand => self.brands.contains_key(id),
            EntityKind::Attribute => self.attributes.contains_key(id),
            EntityKind::Product => self.products.contains_key(id),
            EntityKind::ProductAttributeValue => self.attribute_values.contains_key(id),
        }
    }

    /// Number of stored records of `entity`
    pub fn count(&self, entity: EntityKind) -> usize {
        match entity {
            EntityKind::User => self.users.len(),
            EntityKind::Category => self.categories.len(),
            EntityKind::SubCategory => self.sub_categories.len(),
            EntityKind::Brand => self.brands.len(),
            EntityKind::Attribute => self.attributes.len(),
            EntityKind::Product => self.products.len(),
            EntityKind::ProductAttributeValue => self.attribute_values.len(),
        }
    }

    // ===== Lookups =====

    /// # Errors
    ///
    /// Returns `NotFound` if no user has this id.
    pub fn get_user(&self, id: &str) -> Result<&User> {
        self.users
            .get(id)
            .ok_or_else(|| not_found(EntityKind::User, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no category has this id.
    pub fn get_category(&self, id: &str) -> Result<&Category> {
        self.categories
            .get(id)
            .ok_or_else(|| not_found(EntityKind::Category, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no sub-category has this id.
    pub fn get_sub_category(&self, id: &str) -> Result<&SubCategory> {
        self.sub_categories
            .get(id)
            .ok_or_else(|| not_found(EntityKind::SubCategory, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no brand has this id.
    pub fn get_brand(&self, id: &str) -> Result<&Brand> {
        self.brands
            .get(id)
            .ok_or_else(|| not_found(EntityKind::Brand, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no attribute has this id.
    pub fn get_attribute(&self, id: &str) -> Result<&Attribute> {
        self.attributes
            .get(id)
            .ok_or_else(|| not_found(EntityKind::Attribute, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no product has this id.
    pub fn get_product(&self, id: &str) -> Result<&Product> {
        self.products
            .get(id)
            .ok_or_else(|| not_found(EntityKind::Product, id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no attribute value has this id.
    pub fn get_attribute_value(&self, id: &str) -> Result<&ProductAttributeValue> {
        self.attribute_values
            .get(id)
            .ok_or_else(|| not_found(EntityKind::ProductAttributeValue, id))
    }

    // ===== Listings in declared order =====

    /// Users by id
    pub fn list_users(&self) -> Vec<&User> {
        let mut users: Vec<_> = self.users.values().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    /// Categories, newest first
    pub fn list_categories(&self) -> Vec<&Category> {
        let mut categories: Vec<_> = self.categories.values().collect();
        categories.sort_by(|a, b| {
            newest_first((a.created_at, a.id.as_str()), (b.created_at, b.id.as_str()))
        });
        categories
    }

    /// Sub-categories, newest first
    pub fn list_sub_categories(&self) -> Vec<&SubCategory> {
        let mut sub_categories: Vec<_> = self.sub_categories.values().collect();
        sub_categories.sort_by(|a, b| {
            newest_first((a.created_at, a.id.as_str()), (b.created_at, b.id.as_str()))
        });
        sub_categories
    }

    /// Brands by id
    pub fn list_brands(&self) -> Vec<&Brand> {
        let mut brands: Vec<_> = self.brands.values().collect();
        brands.sort_by(|a, b| a.id.cmp(&b.id));
        brands
    }

    /// Attributes ordered by their category's creation time
    ///
    /// Attributes without a category come first; ties are broken by id.
    pub fn list_attributes(&self) -> Vec<&Attribute> {
        let category_created = |attribute: &Attribute| {
            attribute
                .category_id
                .as_deref()
                .and_then(|id| self.categories.get(id))
                .map(|c| c.created_at)
        };
        let mut attributes: Vec<_> = self.attributes.values().collect();
        attributes.sort_by(|a, b| {
            category_created(a)
                .cmp(&category_created(b))
                .then_with(|| a.id.cmp(&b.id))
        });
        attributes
    }

    /// Products, newest first
    pub fn list_products(&self) -> Vec<&Product> {
        let mut products: Vec<_> = self.products.values().collect();
        products.sort_by(|a, b| {
            newest_first((a.created_at, a.id.as_str()), (b.created_at, b.id.as_str()))
        });
        products
    }

    /// Attribute values by id
    pub fn list_attribute_values(&self) -> Vec<&ProductAttributeValue> {
        let mut values: Vec<_> = self.attribute_values.values().collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        values
    }

    // ===== Raw writes =====
    //
    // These skip uniqueness and reference checks. Hydration uses them to
    // load rows the database already accepted.

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    pub fn insert_sub_category(&mut self, sub_category: SubCategory) {
        self.sub_categories
            .insert(sub_category.id.clone(), sub_category);
    }

    pub fn insert_brand(&mut self, brand: Brand) {
        self.brands.insert(brand.id.clone(), brand);
    }

    pub fn insert_attribute(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.id.clone(), attribute);
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn insert_attribute_value(&mut self, value: ProductAttributeValue) {
        self.attribute_values.insert(value.id.clone(), value);
    }

    pub(crate) fn remove(&mut self, entity: EntityKind, id: &str) -> bool {
        match entity {
            EntityKind::User => self.users.remove(id).is_some(),
            EntityKind::Category => self.categories.remove(id).is_some(),
            EntityKind::SubCategory => self.sub_categories.remove(id).is_some(),
            EntityKind::Brand => self.brands.remove(id).is_some(),
            EntityKind::Attribute => self.attributes.remove(id).is_some(),
            EntityKind::Product => self.products.remove(id).is_some(),
            EntityKind::ProductAttributeValue => self.attribute_values.remove(id).is_some(),
        }
    }

    /// Clear the nullable reference `fk` on the child row `child_id`
    ///
    /// Leaves `updated_at` untouched.
    pub(crate) fn clear_reference(&mut self, fk: ForeignKey, child_id: &str) {
        match fk {
            ForeignKey::SubCategoryCategory => {
                if let Some(row) = self.sub_categories.get_mut(child_id) {
                    row.category_id = None;
                }
            }
            ForeignKey::AttributeCategory => {
                if let Some(row) = self.attributes.get_mut(child_id) {
                    row.category_id = None;
                }
            }
            ForeignKey::ProductSubCategory => {
                if let Some(row) = self.products.get_mut(child_id) {
                    row.sub_category_id = None;
                }
            }
            ForeignKey::ProductBrand => {
                if let Some(row) = self.products.get_mut(child_id) {
                    row.brand_id = None;
                }
            }
            ForeignKey::ProductOwner
            | ForeignKey::AttributeValueAttribute
            | ForeignKey::AttributeValueProduct => {}
        }
    }

    /// Ids of the rows whose `fk` column holds `parent_id`, sorted
    pub fn referencing_ids(&self, fk: ForeignKey, parent_id: &str) -> Vec<String> {
        let refers = |value: Option<&str>| value == Some(parent_id);
        let mut ids: Vec<String> = match fk {
            ForeignKey::SubCategoryCategory => self
                .sub_categories
                .values()
                .filter(|r| refers(r.category_id.as_deref()))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::AttributeCategory => self
                .attributes
                .values()
                .filter(|r| refers(r.category_id.as_deref()))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::ProductOwner => self
                .products
                .values()
                .filter(|r| refers(Some(r.owner_id.as_str())))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::ProductSubCategory => self
                .products
                .values()
                .filter(|r| refers(r.sub_category_id.as_deref()))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::ProductBrand => self
                .products
                .values()
                .filter(|r| refers(r.brand_id.as_deref()))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::AttributeValueAttribute => self
                .attribute_values
                .values()
                .filter(|r| refers(Some(r.attribute_id.as_str())))
                .map(|r| r.id.clone())
                .collect(),
            ForeignKey::AttributeValueProduct => self
                .attribute_values
                .values()
                .filter(|r| refers(Some(r.product_id.as_str())))
                .map(|r| r.id.clone())
                .collect(),
        };
        ids.sort();
        ids
    }

    // ===== Constraint checks =====

    /// Reject a link to a row that does not exist
    ///
    /// # Errors
    ///
    /// Returns `DanglingReference` when `target_id` is set but missing.
    pub(crate) fn check_reference(&self, fk: ForeignKey, target_id: Option<&str>) -> Result<()> {
        match target_id {
            Some(id) if !self.contains(fk.parent(), id) => Err(ShopError::DanglingReference {
                entity: fk.child(),
                field: fk.column(),
                target: fk.parent(),
                id: id.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns `AlreadyExists` when a row of `entity` already has `id`.
    pub(crate) fn check_new_id(&self, entity: EntityKind, id: &str) -> Result<()> {
        if self.contains(entity, id) {
            return Err(ShopError::AlreadyExists {
                entity,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// Fail with `UniqueViolation` when another row already holds `value`
///
/// `rows` yields `(id, value)` pairs; the row `own_id` is skipped so an
/// update can keep its own value.
pub(crate) fn check_unique<'a>(
    rows: impl IntoIterator<Item = (&'a str, &'a str)>,
    own_id: &str,
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<()> {
    let taken = rows
        .into_iter()
        .any(|(id, existing)| id != own_id && existing == value);
    if taken {
        return Err(ShopError::UniqueViolation {
            entity,
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
