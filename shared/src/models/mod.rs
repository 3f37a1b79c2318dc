//! Domain models shared between the server and API clients
//!
//! Each entity has a full record type plus, where the API supports partial
//! updates, a patch type whose fields are all optional slots. Nullable
//! columns use a double-`Option` slot so "field not provided" (outer `None`)
//! and "field set to null" (`Some(None)`) stay distinguishable.

pub mod account;
pub mod business_info;
pub mod website_setup;

pub use account::{Account, AccountPublic, BusinessCategory};
pub use business_info::{BusinessInfo, BusinessInfoUpdate, DayHours, WorkingHours};
pub use website_setup::{WebsiteSetup, WebsiteSetupUpdate};

use serde::{Deserialize, Deserializer};

/// Deserializer for double-`Option` patch slots.
///
/// With `#[serde(default, deserialize_with = "double_option")]`:
/// - field absent  → `None`
/// - field null    → `Some(None)`
/// - field value v → `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
