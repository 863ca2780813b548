use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Second-level grouping; products point at a sub-category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,

    /// Owning category, cleared when the category is deleted
    pub category_id: Option<String>,

    pub name: String,
    pub slug: String,
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`SubCategory`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubCategory {
    pub category_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub meta_description: String,
}

impl SubCategory {
    pub const NAME_MAX_CHARS: usize = 50;
    pub const SLUG_MAX_CHARS: usize = 50;
    pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

    pub fn new(id: String, name: String, slug: String, meta_description: String) -> Self {
        let now = super::now();
        Self {
            id,
            category_id: None,
            name,
            slug,
            meta_description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(new: NewSubCategory) -> Self {
        let mut sub_category =
            Self::new(super::new_id(), new.name, new.slug, new.meta_description);
        sub_category.category_id = new.category_id;
        sub_category
    }

    pub fn touch(&mut self) {
        self.updated_at = super::now();
    }

    /// Label qualified by the parent category name
    ///
    /// `category` must be the row referenced by `category_id` (or `None`).
    pub fn label(&self, category: Option<&Category>) -> String {
        let parent = category.map_or(super::NO_CATEGORY, |c| c.name.as_str());
        format!("{} ({})", self.name, parent)
    }
}
