//! Field-level and model-level validation
//!
//! Validation is advisory: nothing in the store or the repository calls it.
//! Callers run [`Validate::full_clean`] before persisting when they want the
//! input checked, mirroring the declared field limits of each model.

use rust_decimal::Decimal;
use serde::Serialize;

use super::slug::is_valid_slug;
use crate::model::{
    Attribute, Brand, Category, EntityKind, Product, ProductAttributeValue, SubCategory, User,
    BRAND_LOGO_DIR,
};
use crate::ops::Store;

pub const BLANK_MESSAGE: &str = "This field cannot be blank.";
pub const SLUG_MESSAGE: &str =
    "Enter a valid “slug” consisting of Unicode letters, numbers, underscores, or hyphens.";
pub const URL_MESSAGE: &str = "Enter a valid URL.";

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// A single rejected value
///
/// `field` is `None` for model-level (non-field) errors such as the product
/// discount rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every error found by one `full_clean` run, in field declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Errors reported against `field`
    pub fn for_field(&self, field: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.field == Some(field)).collect()
    }

    pub fn non_field_errors(&self) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.field.is_none()).collect()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validation contract implemented by every catalog record
pub trait Validate {
    /// Check each field against its declared limits
    fn clean_fields(&self, errors: &mut ValidationErrors);

    /// Cross-field rules
    ///
    /// # Errors
    ///
    /// Returns the first model-level violation.
    fn clean(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Run field checks, then model checks, and report everything found
    ///
    /// # Errors
    ///
    /// Returns all collected errors when any check fails.
    fn full_clean(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.clean_fields(&mut errors);
        if let Err(error) = self.clean() {
            errors.push(error);
        }
        errors.into_result()
    }
}

// ===== Field checks =====

fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.is_empty() {
        errors.push(ValidationError::new(field, BLANK_MESSAGE));
        return false;
    }
    true
}

fn check_max_chars(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.push(ValidationError::new(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, len
            ),
        ));
    }
}

fn check_text(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if check_required(errors, field, value) {
        check_max_chars(errors, field, value, max);
    }
}

fn check_slug(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if !check_required(errors, field, value) {
        return;
    }
    check_max_chars(errors, field, value, max);
    if !is_valid_slug(value) {
        errors.push(ValidationError::new(field, SLUG_MESSAGE));
    }
}

fn check_url(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    check_max_chars(errors, field, value, max);
    let valid = url::Url::parse(value)
        .map(|u| URL_SCHEMES.contains(&u.scheme()) && u.host().is_some())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::new(field, URL_MESSAGE));
    }
}

fn check_logo_path(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    check_max_chars(errors, field, value, max);
    let file_name = value.strip_prefix(BRAND_LOGO_DIR).unwrap_or_default();
    if file_name.is_empty() || file_name.split('/').any(|part| part.is_empty() || part == "..") {
        errors.push(ValidationError::new(
            field,
            format!("Logo must be a file stored under {}.", BRAND_LOGO_DIR),
        ));
    }
}

/// Digit and precision limits of a fixed-point column
fn check_decimal(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) {
    let decimals = value.scale();
    let mantissa_digits = value.mantissa().unsigned_abs().to_string().len() as u32;
    let digits = mantissa_digits.max(decimals);
    let whole_digits = digits - decimals;

    if digits > max_digits {
        errors.push(ValidationError::new(
            field,
            format!(
                "Ensure that there are no more than {} digits in total.",
                max_digits
            ),
        ));
    }
    if decimals > decimal_places {
        errors.push(ValidationError::new(
            field,
            format!(
                "Ensure that there are no more than {} decimal places.",
                decimal_places
            ),
        ));
    }
    if whole_digits > max_digits - decimal_places {
        errors.push(ValidationError::new(
            field,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_digits - decimal_places
            ),
        ));
    }
}

// ===== Model implementations =====

impl Validate for User {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_text(errors, "username", &self.username, User::USERNAME_MAX_CHARS);
    }
}

impl Validate for Category {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_text(errors, "name", &self.name, Category::NAME_MAX_CHARS);
        check_slug(errors, "slug", &self.slug, Category::SLUG_MAX_CHARS);
        check_text(
            errors,
            "meta_description",
            &self.meta_description,
            Category::META_DESCRIPTION_MAX_CHARS,
        );
    }
}

impl Validate for SubCategory {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_text(errors, "name", &self.name, SubCategory::NAME_MAX_CHARS);
        check_slug(errors, "slug", &self.slug, SubCategory::SLUG_MAX_CHARS);
        check_text(
            errors,
            "meta_description",
            &self.meta_description,
            SubCategory::META_DESCRIPTION_MAX_CHARS,
        );
    }
}

impl Validate for Brand {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_text(errors, "name", &self.name, Brand::NAME_MAX_CHARS);
        check_text(
            errors,
            "localized_name",
            &self.localized_name,
            Brand::LOCALIZED_NAME_MAX_CHARS,
        );
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            check_url(errors, "url", url, Brand::URL_MAX_CHARS);
        }
        if let Some(logo) = self.logo.as_deref().filter(|l| !l.is_empty()) {
            check_logo_path(errors, "logo", logo, Brand::LOGO_MAX_CHARS);
        }
    }
}

impl Validate for Attribute {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_text(errors, "name", &self.name, Attribute::NAME_MAX_CHARS);
    }
}

impl Validate for Product {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_required(errors, "owner_id", &self.owner_id);
        check_text(errors, "name", &self.name, Product::NAME_MAX_CHARS);
        check_decimal(
            errors,
            "price",
            self.price,
            Product::PRICE_MAX_DIGITS,
            Product::PRICE_DECIMAL_PLACES,
        );
        check_decimal(
            errors,
            "off_price",
            self.off_price,
            Product::PRICE_MAX_DIGITS,
            Product::PRICE_DECIMAL_PLACES,
        );
        check_required(errors, "description", &self.description);
        check_text(
            errors,
            "meta_description",
            &self.meta_description,
            Product::META_DESCRIPTION_MAX_CHARS,
        );
    }

    fn clean(&self) -> Result<(), ValidationError> {
        Product::clean(self)
    }
}

impl Validate for ProductAttributeValue {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        check_required(errors, "attribute_id", &self.attribute_id);
        check_required(errors, "product_id", &self.product_id);
        check_text(
            errors,
            "value",
            &self.value,
            ProductAttributeValue::VALUE_MAX_CHARS,
        );
    }
}

/// A record that failed `full_clean`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidRecord {
    pub entity: EntityKind,
    pub id: String,
    pub errors: ValidationErrors,
}

fn audit_into<'a, T, I>(report: &mut Vec<InvalidRecord>, entity: EntityKind, records: I)
where
    T: Validate + 'a,
    I: IntoIterator<Item = (&'a str, &'a T)>,
{
    for (id, record) in records {
        if let Err(errors) = record.full_clean() {
            report.push(InvalidRecord {
                entity,
                id: id.to_string(),
                errors,
            });
        }
    }
}

/// Run `full_clean` over every record in the store
///
/// Rows can be persisted without validation, so this reports what a
/// validating writer would have rejected. Records are reported per entity
/// kind in each kind's list order.
pub fn audit_store(store: &Store) -> Vec<InvalidRecord> {
    let mut report = Vec::new();
    audit_into(
        &mut report,
        EntityKind::User,
        store.list_users().into_iter().map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::Category,
        store.list_categories().into_iter().map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::SubCategory,
        store
            .list_sub_categories()
            .into_iter()
            .map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::Brand,
        store.list_brands().into_iter().map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::Attribute,
        store.list_attributes().into_iter().map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::Product,
        store.list_products().into_iter().map(|r| (r.id.as_str(), r)),
    );
    audit_into(
        &mut report,
        EntityKind::ProductAttributeValue,
        store
            .list_attribute_values()
            .into_iter()
            .map(|r| (r.id.as_str(), r)),
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str) -> Category {
        Category::new(
            "cat-1".to_string(),
            name.to_string(),
            slug.to_string(),
            "Everything".to_string(),
        )
    }

    #[test]
    fn test_valid_category_passes() {
        assert!(category("Mobile", "mobile").full_clean().is_ok());
    }

    #[test]
    fn test_blank_name_reported() {
        let errors = category("", "mobile").full_clean().unwrap_err();
        assert_eq!(errors.for_field("name")[0].message, BLANK_MESSAGE);
    }

    #[test]
    fn test_whitespace_is_not_blank() {
        assert!(category("  ", "mobile").full_clean().is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 two-byte characters fit
        let name: String = "ب".repeat(50);
        assert!(category(&name, "b").full_clean().is_ok());

        let name: String = "ب".repeat(51);
        let errors = category(&name, "b").full_clean().unwrap_err();
        assert_eq!(
            errors.for_field("name")[0].message,
            "Ensure this value has at most 50 characters (it has 51)."
        );
    }

    #[test]
    fn test_bad_slug_reported() {
        let errors = category("Mobile", "mobile phones").full_clean().unwrap_err();
        assert_eq!(errors.for_field("slug")[0].message, SLUG_MESSAGE);
    }

    #[test]
    fn test_brand_url_and_logo_are_optional() {
        let brand = Brand::new("b-1".to_string(), "Acme".to_string(), "Acme".to_string());
        assert!(brand.full_clean().is_ok());
    }

    #[test]
    fn test_brand_url_must_be_absolute_http() {
        let mut brand = Brand::new("b-1".to_string(), "Acme".to_string(), "Acme".to_string());
        brand.url = Some("acme.example".to_string());
        assert_eq!(
            brand.full_clean().unwrap_err().for_field("url")[0].message,
            URL_MESSAGE
        );

        brand.url = Some("mailto:sales@acme.example".to_string());
        assert!(brand.full_clean().is_err());

        brand.url = Some("https://acme.example/about".to_string());
        assert!(brand.full_clean().is_ok());
    }

    #[test]
    fn test_brand_logo_must_stay_in_namespace() {
        let mut brand = Brand::new("b-1".to_string(), "Acme".to_string(), "Acme".to_string());
        brand.logo = Some("uploads/acme.png".to_string());
        assert!(brand.full_clean().is_err());

        brand.logo = Some("brand_logos/../secret.png".to_string());
        assert!(brand.full_clean().is_err());

        brand.set_logo("acme.png");
        assert!(brand.full_clean().is_ok());
    }

    fn product(price: &str, off_price: &str) -> Product {
        let mut p = Product::new(
            "p-1".to_string(),
            "u-1".to_string(),
            "Phone".to_string(),
            price.parse().unwrap(),
            off_price.parse().unwrap(),
        );
        p.description = "Unlocked, dual SIM".to_string();
        p.meta_description = "A phone".to_string();
        p
    }

    #[test]
    fn test_full_clean_runs_discount_rule() {
        let errors = product("100.00", "100.00").full_clean().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.non_field_errors()[0].message,
            crate::model::product::DISCOUNT_PRICE_MESSAGE
        );
    }

    #[test]
    fn test_discount_rule_runs_when_fields_invalid() {
        let mut p = product("100.00", "100.00");
        p.name = String::new();
        let errors = p.full_clean().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("name")[0].message, BLANK_MESSAGE);
        assert_eq!(errors.non_field_errors().len(), 1);
    }

    #[test]
    fn test_blank_description_reported() {
        let mut p = product("100.00", "90.00");
        p.description = String::new();
        let errors = p.full_clean().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("description")[0].message, BLANK_MESSAGE);
    }

    #[test]
    fn test_price_precision_limits() {
        let errors = product("1.005", "0.50").full_clean().unwrap_err();
        assert_eq!(
            errors.for_field("price")[0].message,
            "Ensure that there are no more than 2 decimal places."
        );

        let errors = product("123456789.00", "1.00").full_clean().unwrap_err();
        let messages: Vec<_> = errors
            .for_field("price")
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert!(messages.contains(&"Ensure that there are no more than 10 digits in total."));
        assert!(messages
            .contains(&"Ensure that there are no more than 8 digits before the decimal point."));

        assert!(product("99999999.99", "0.05").full_clean().is_ok());
    }

    #[test]
    fn test_errors_display_joined() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::new("name", BLANK_MESSAGE));
        errors.push(ValidationError::non_field("Broken."));
        assert_eq!(
            errors.to_string(),
            "name: This field cannot be blank.; Broken."
        );
    }
}
