use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account that owns products
///
/// Accounts are managed outside the catalog; only the fields needed to
/// reference an owner are kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new [`User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
}

impl User {
    pub const USERNAME_MAX_CHARS: usize = 150;

    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            created_at: super::now(),
        }
    }

    pub fn create(new: NewUser) -> Self {
        Self::new(super::new_id(), new.username)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}
