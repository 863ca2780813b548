use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level grouping of the catalog
///
/// Sub-categories and attributes point at a category through a nullable
/// link; deleting the category clears those links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,

    /// Unique display name
    pub name: String,

    /// Unique, unicode-aware URL identifier
    pub slug: String,

    /// Short description for search engines
    pub meta_description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`Category`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub meta_description: String,
}

impl Category {
    pub const NAME_MAX_CHARS: usize = 50;
    pub const SLUG_MAX_CHARS: usize = 50;
    pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

    pub fn new(id: String, name: String, slug: String, meta_description: String) -> Self {
        let now = super::now();
        Self {
            id,
            name,
            slug,
            meta_description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a category with a fresh id and timestamps
    pub fn create(new: NewCategory) -> Self {
        Self::new(super::new_id(), new.name, new.slug, new.meta_description)
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = super::now();
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
