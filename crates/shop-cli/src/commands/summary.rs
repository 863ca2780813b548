//! Summary command
//!
//! Usage: shopctl [--db <FILE>] summary [--only <SECTION>]

use clap::{Args, ValueEnum};
use shop_core::model::EntityKind;
use shop_core::ops::labels::{attribute_label, product_label, sub_category_label};
use shop_core::ops::Store;
use shop_core::ExError;
use shop_store::repo::hydration::load_catalog;

use crate::config::ShopConfig;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Print a single section
    #[arg(long, value_enum)]
    pub only: Option<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Categories,
    SubCategories,
    Attributes,
    Brands,
    Products,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Categories,
        Section::SubCategories,
        Section::Attributes,
        Section::Brands,
        Section::Products,
    ];

    fn entity(self) -> EntityKind {
        match self {
            Section::Categories => EntityKind::Category,
            Section::SubCategories => EntityKind::SubCategory,
            Section::Attributes => EntityKind::Attribute,
            Section::Brands => EntityKind::Brand,
            Section::Products => EntityKind::Product,
        }
    }
}

/// Labels of one section, in the entity's list order
fn labels(store: &Store, section: Section) -> shop_core::Result<Vec<String>> {
    match section {
        Section::Categories => Ok(store
            .list_categories()
            .into_iter()
            .map(|c| c.to_string())
            .collect()),
        Section::SubCategories => store
            .list_sub_categories()
            .into_iter()
            .map(|s| sub_category_label(store, &s.id))
            .collect(),
        Section::Attributes => store
            .list_attributes()
            .into_iter()
            .map(|a| attribute_label(store, &a.id))
            .collect(),
        Section::Brands => Ok(store
            .list_brands()
            .into_iter()
            .map(|b| b.to_string())
            .collect()),
        Section::Products => store
            .list_products()
            .into_iter()
            .map(|p| product_label(store, &p.id))
            .collect(),
    }
}

/// Execute summary command
pub fn execute(args: SummaryArgs, config: &ShopConfig) -> Result<(), ExError> {
    let conn = super::open_migrated(config)?;
    let store = load_catalog(&conn)?;

    let sections = match args.only {
        Some(section) => vec![section],
        None => Section::ALL.to_vec(),
    };

    for section in sections {
        let labels = labels(&store, section)?;
        println!("{} ({})", section.entity().verbose_name_plural(), labels.len());
        for label in labels {
            println!("  {}", label);
        }
    }
    Ok(())
}
