use serde::{Deserialize, Serialize};

use super::category::Category;

/// Per-category attribute definition (for example "Screen size")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub category_id: Option<String>,
    pub name: String,
}

/// Data required to insert a new [`Attribute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttribute {
    pub category_id: Option<String>,
    pub name: String,
}

impl Attribute {
    pub const NAME_MAX_CHARS: usize = 50;

    pub fn new(id: String, category_id: Option<String>, name: String) -> Self {
        Self {
            id,
            category_id,
            name,
        }
    }

    pub fn create(new: NewAttribute) -> Self {
        Self::new(super::new_id(), new.category_id, new.name)
    }

    pub fn label(&self, category: Option<&Category>) -> String {
        let parent = category.map_or(super::NO_CATEGORY, |c| c.name.as_str());
        format!("{} ({})", self.name, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_placeholder() {
        let attribute = Attribute::new("attr-1".to_string(), None, "Color".to_string());
        assert_eq!(attribute.label(None), "Color (No Category)");
    }
}
