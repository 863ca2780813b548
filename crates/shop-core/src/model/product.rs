use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{category::Category, sub_category::SubCategory};
use crate::rules::validation::ValidationError;

/// Message reported when the discount rule is broken
pub const DISCOUNT_PRICE_MESSAGE: &str = "Discount price must be less than the original price.";

/// Sellable item
///
/// `off_price < price` is a validation rule, not a storage constraint:
/// rows breaking it can be persisted and are only rejected when
/// [`Product::clean`] (or `full_clean`) is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    /// Owning account; the account cannot be deleted while it owns products
    pub owner_id: String,

    pub name: String,
    pub sub_category_id: Option<String>,
    pub brand_id: Option<String>,

    /// Units in stock
    pub count: i32,

    pub price: Decimal,

    /// Discounted price
    pub off_price: Decimal,

    /// Whether the discounted price applies
    pub is_off: bool,

    pub is_stock: bool,

    /// Stored as empty by default; `full_clean` requires text
    pub description: String,

    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new [`Product`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub owner_id: String,
    pub name: String,
    pub sub_category_id: Option<String>,
    pub brand_id: Option<String>,
    pub count: i32,
    pub price: Decimal,
    pub off_price: Decimal,
    pub is_off: bool,
    pub is_stock: bool,
    pub description: String,
    pub meta_description: String,
}

impl Product {
    pub const NAME_MAX_CHARS: usize = 100;
    pub const META_DESCRIPTION_MAX_CHARS: usize = 160;
    pub const PRICE_MAX_DIGITS: u32 = 10;
    pub const PRICE_DECIMAL_PLACES: u32 = 2;

    /// Create a product with defaults for every optional field
    pub fn new(
        id: String,
        owner_id: String,
        name: String,
        price: Decimal,
        off_price: Decimal,
    ) -> Self {
        let now = super::now();
        Self {
            id,
            owner_id,
            name,
            sub_category_id: None,
            brand_id: None,
            count: 0,
            price,
            off_price,
            is_off: false,
            is_stock: false,
            description: String::new(),
            meta_description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(new: NewProduct) -> Self {
        let mut product = Self::new(
            super::new_id(),
            new.owner_id,
            new.name,
            new.price,
            new.off_price,
        );
        product.sub_category_id = new.sub_category_id;
        product.brand_id = new.brand_id;
        product.count = new.count;
        product.is_off = new.is_off;
        product.is_stock = new.is_stock;
        product.description = new.description;
        product.meta_description = new.meta_description;
        product
    }

    pub fn touch(&mut self) {
        self.updated_at = super::now();
    }

    /// Model-level validation: the discounted price must be below the price
    ///
    /// # Errors
    ///
    /// Returns a non-field [`ValidationError`] when `off_price >= price`.
    pub fn clean(&self) -> Result<(), ValidationError> {
        if self.off_price >= self.price {
            return Err(ValidationError::non_field(DISCOUNT_PRICE_MESSAGE));
        }
        Ok(())
    }

    /// Price a shopper pays right now
    pub fn effective_price(&self) -> Decimal {
        if self.is_off {
            self.off_price
        } else {
            self.price
        }
    }

    /// Label with stock marker and the category reached through the sub-category
    ///
    /// `sub_category` must be the row referenced by `sub_category_id`, and
    /// `category` the row referenced by that sub-category.
    pub fn label(&self, sub_category: Option<&SubCategory>, category: Option<&Category>) -> String {
        let status_icon = if self.is_stock { "🟢" } else { "🔴" };
        let parent = match (sub_category, category) {
            (None, _) => super::NO_SUB_CATEGORY,
            (Some(_), None) => super::NO_CATEGORY,
            (Some(_), Some(category)) => category.name.as_str(),
        };
        format!("{} {} ({})", status_icon, self.name, parent)
    }
}
