use serde::{Deserialize, Serialize};

/// Every record type persisted by the catalog schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Category,
    SubCategory,
    Brand,
    Attribute,
    Product,
    ProductAttributeValue,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::User,
        EntityKind::Category,
        EntityKind::SubCategory,
        EntityKind::Brand,
        EntityKind::Attribute,
        EntityKind::Product,
        EntityKind::ProductAttributeValue,
    ];

    /// Name of the backing table
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Category => "categories",
            EntityKind::SubCategory => "sub_categories",
            EntityKind::Brand => "brands",
            EntityKind::Attribute => "attributes",
            EntityKind::Product => "products",
            EntityKind::ProductAttributeValue => "product_attribute_values",
        }
    }

    /// Singular, human-readable name used in messages
    pub fn verbose_name(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Category => "category",
            EntityKind::SubCategory => "sub category",
            EntityKind::Brand => "brand",
            EntityKind::Attribute => "attribute",
            EntityKind::Product => "product",
            EntityKind::ProductAttributeValue => "product attribute value",
        }
    }

    pub fn verbose_name_plural(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Category => "categories",
            EntityKind::SubCategory => "sub categories",
            EntityKind::Brand => "brands",
            EntityKind::Attribute => "attributes",
            EntityKind::Product => "products",
            EntityKind::ProductAttributeValue => "product attribute values",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verbose_name())
    }
}
