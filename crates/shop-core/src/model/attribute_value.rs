use serde::{Deserialize, Serialize};

/// Value of one attribute for one product
///
/// Deleted together with either its attribute or its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributeValue {
    pub id: String,
    pub attribute_id: String,
    pub product_id: String,
    pub value: String,
}

/// Data required to insert a new [`ProductAttributeValue`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductAttributeValue {
    pub attribute_id: String,
    pub product_id: String,
    pub value: String,
}

impl ProductAttributeValue {
    pub const VALUE_MAX_CHARS: usize = 250;

    pub fn new(id: String, attribute_id: String, product_id: String, value: String) -> Self {
        Self {
            id,
            attribute_id,
            product_id,
            value,
        }
    }

    pub fn create(new: NewProductAttributeValue) -> Self {
        Self::new(super::new_id(), new.attribute_id, new.product_id, new.value)
    }
}
