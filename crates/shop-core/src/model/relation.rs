//! Foreign keys between catalog records and their on-delete policies
//!
//! Nullable links (category, sub-category, brand) are weak references: the
//! child keeps an optional id and the parent never owns it. The policies here
//! are applied explicitly by the delete planner; the SQL schema declares the
//! same `ON DELETE` actions.

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;

/// What happens to referencing rows when the referenced row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
    /// Clear the reference, keep the row
    SetNull,
    /// Delete the referencing rows too
    Cascade,
    /// Refuse the delete while referencing rows exist
    Protect,
}

impl OnDelete {
    /// SQL action clause matching this policy
    pub fn sql_action(&self) -> &'static str {
        match self {
            OnDelete::SetNull => "SET NULL",
            OnDelete::Cascade => "CASCADE",
            OnDelete::Protect => "RESTRICT",
        }
    }
}

/// Every foreign key declared by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignKey {
    SubCategoryCategory,
    AttributeCategory,
    ProductOwner,
    ProductSubCategory,
    ProductBrand,
    AttributeValueAttribute,
    AttributeValueProduct,
}

impl ForeignKey {
    pub const ALL: [ForeignKey; 7] = [
        ForeignKey::SubCategoryCategory,
        ForeignKey::AttributeCategory,
        ForeignKey::ProductOwner,
        ForeignKey::ProductSubCategory,
        ForeignKey::ProductBrand,
        ForeignKey::AttributeValueAttribute,
        ForeignKey::AttributeValueProduct,
    ];

    /// Entity holding the reference column
    pub fn child(&self) -> EntityKind {
        match self {
            ForeignKey::SubCategoryCategory => EntityKind::SubCategory,
            ForeignKey::AttributeCategory => EntityKind::Attribute,
            ForeignKey::ProductOwner
            | ForeignKey::ProductSubCategory
            | ForeignKey::ProductBrand => {
                EntityKind::Product
            }
            ForeignKey::AttributeValueAttribute | ForeignKey::AttributeValueProduct => {
                EntityKind::ProductAttributeValue
            }
        }
    }

    /// Referenced entity
    pub fn parent(&self) -> EntityKind {
        match self {
            ForeignKey::SubCategoryCategory | ForeignKey::AttributeCategory => EntityKind::Category,
            ForeignKey::ProductOwner => EntityKind::User,
            ForeignKey::ProductSubCategory => EntityKind::SubCategory,
            ForeignKey::ProductBrand => EntityKind::Brand,
            ForeignKey::AttributeValueAttribute => EntityKind::Attribute,
            ForeignKey::AttributeValueProduct => EntityKind::Product,
        }
    }

    /// Column name on the child table
    pub fn column(&self) -> &'static str {
        match self {
            ForeignKey::SubCategoryCategory | ForeignKey::AttributeCategory => "category_id",
            ForeignKey::ProductOwner => "owner_id",
            ForeignKey::ProductSubCategory => "sub_category_id",
            ForeignKey::ProductBrand => "brand_id",
            ForeignKey::AttributeValueAttribute => "attribute_id",
            ForeignKey::AttributeValueProduct => "product_id",
        }
    }

    /// Name of the reverse accessor on the parent
    pub fn related_name(&self) -> &'static str {
        match self {
            ForeignKey::SubCategoryCategory => "sub_categories",
            ForeignKey::AttributeCategory => "attributes",
            ForeignKey::ProductOwner
            | ForeignKey::ProductSubCategory
            | ForeignKey::ProductBrand => {
                "products"
            }
            ForeignKey::AttributeValueAttribute | ForeignKey::AttributeValueProduct => {
                "product_values"
            }
        }
    }

    pub fn on_delete(&self) -> OnDelete {
        match self {
            ForeignKey::SubCategoryCategory
            | ForeignKey::AttributeCategory
            | ForeignKey::ProductSubCategory
            | ForeignKey::ProductBrand => OnDelete::SetNull,
            ForeignKey::ProductOwner => OnDelete::Protect,
            ForeignKey::AttributeValueAttribute | ForeignKey::AttributeValueProduct => {
                OnDelete::Cascade
            }
        }
    }

    /// Whether the column accepts NULL
    pub fn nullable(&self) -> bool {
        self.on_delete() == OnDelete::SetNull
    }

    /// Foreign keys pointing at `parent`
    pub fn referencing(parent: EntityKind) -> impl Iterator<Item = ForeignKey> {
        Self::ALL.into_iter().filter(move |fk| fk.parent() == parent)
    }

    /// Foreign keys declared on `child`
    pub fn declared_on(child: EntityKind) -> impl Iterator<Item = ForeignKey> {
        Self::ALL.into_iter().filter(move |fk| fk.child() == child)
    }
}

impl std::fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} -> {}",
            self.child().table_name(),
            self.column(),
            self.parent().table_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_links_are_nullified() {
        let policies: Vec<_> = ForeignKey::referencing(EntityKind::Category)
            .map(|fk| (fk.child(), fk.on_delete()))
            .collect();
        assert_eq!(
            policies,
            vec![
                (EntityKind::SubCategory, OnDelete::SetNull),
                (EntityKind::Attribute, OnDelete::SetNull),
            ]
        );
    }

    #[test]
    fn test_owner_is_protected_and_required() {
        let fk = ForeignKey::ProductOwner;
        assert_eq!(fk.on_delete(), OnDelete::Protect);
        assert!(!fk.nullable());
        assert_eq!(fk.on_delete().sql_action(), "RESTRICT");
    }

    #[test]
    fn test_attribute_values_cascade_from_both_parents() {
        let fks: Vec<_> = ForeignKey::declared_on(EntityKind::ProductAttributeValue).collect();
        assert_eq!(fks.len(), 2);
        assert!(fks.iter().all(|fk| fk.on_delete() == OnDelete::Cascade));
    }

    #[test]
    fn test_brand_has_no_outgoing_links() {
        assert_eq!(ForeignKey::declared_on(EntityKind::Brand).count(), 0);
        assert_eq!(
            ForeignKey::ProductBrand.to_string(),
            "products.brand_id -> brands"
        );
    }
}
