use serde::{Deserialize, Serialize};

/// Storage namespace for brand logo files
pub const BRAND_LOGO_DIR: &str = "brand_logos/";

/// Manufacturer or label a product is sold under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,

    /// Display name (usually latin script)
    pub name: String,

    /// Name shown to shoppers in the storefront locale
    pub localized_name: String,

    pub url: Option<String>,

    /// Logo file reference, relative to the file store root
    pub logo: Option<String>,
}

/// Data required to insert a new [`Brand`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBrand {
    pub name: String,
    pub localized_name: String,
    pub url: Option<String>,
    pub logo: Option<String>,
}

impl Brand {
    pub const NAME_MAX_CHARS: usize = 150;
    pub const LOCALIZED_NAME_MAX_CHARS: usize = 150;
    pub const URL_MAX_CHARS: usize = 150;
    pub const LOGO_MAX_CHARS: usize = 100;

    pub fn new(id: String, name: String, localized_name: String) -> Self {
        Self {
            id,
            name,
            localized_name,
            url: None,
            logo: None,
        }
    }

    pub fn create(new: NewBrand) -> Self {
        Self {
            id: super::new_id(),
            name: new.name,
            localized_name: new.localized_name,
            url: new.url,
            logo: new.logo,
        }
    }

    /// Storage path for an uploaded logo file name
    pub fn logo_path(file_name: &str) -> String {
        format!("{}{}", BRAND_LOGO_DIR, file_name.trim_start_matches('/'))
    }

    pub fn set_logo(&mut self, file_name: &str) {
        self.logo = Some(Self::logo_path(file_name));
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.localized_name)
    }
}
