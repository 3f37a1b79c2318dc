//! Account model

use serde::{Deserialize, Serialize};

/// Business classification, fixed at signup and immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessCategory {
    Hospital,
    Pharmacy,
}

impl BusinessCategory {
    /// Database representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Pharmacy => "pharmacy",
        }
    }

    /// Parse the database representation
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "hospital" => Some(Self::Hospital),
            "pharmacy" => Some(Self::Pharmacy),
            _ => None,
        }
    }
}

/// Account entity (database row)
///
/// `category` is stored as its raw string form; use
/// [`BusinessCategory::from_db`] to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub name: String,
    pub category: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Public wire representation (never includes the password hash)
    pub fn to_public(&self) -> AccountPublic {
        AccountPublic {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public account representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountPublic {
    pub id: String,
    pub email: String,
    pub name: String,
    pub category: String,
    pub created_at: i64,
}
