//! Shop Core - catalog schema, validation rules and delete policies
//!
//! This crate provides the domain layer of the shop catalog:
//! - Record types for categories, sub-categories, brands, attributes,
//!   products and product attribute values (plus the owning user)
//! - The foreign-key table with its on-delete policies (set null, cascade, protect)
//! - Field-level validation and the product discount rule
//! - An in-memory `Store` with CRUD operations that enforce the same
//!   constraints as the relational schema
//! - Structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;

pub use shop_core_types as types;

pub use errors::{ExError, ExErrorKind, Result, ShopError};
pub use model::{
    Attribute, Brand, Category, EntityKind, ForeignKey, OnDelete, Product,
    ProductAttributeValue, SubCategory, User,
};
pub use ops::Store;
pub use rules::validation::{Validate, ValidationError, ValidationErrors};
