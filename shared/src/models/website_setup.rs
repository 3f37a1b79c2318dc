//! Website setup model (singleton per account)

use serde::{Deserialize, Serialize};

/// Website configuration entity, exactly one per account
///
/// Created at signup with a subdomain derived from the email local part, or
/// lazily on first access (in which case `subdomain` is null until set).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WebsiteSetup {
    pub id: String,
    pub account_id: String,

    // Feature toggles
    pub review_system: bool,
    pub ai_chatbot: bool,
    pub ambulance_ordering: bool,
    pub patient_portal: bool,
    pub prescription_refill: bool,

    /// Pharmacy template selector
    pub template_id: Option<i64>,

    // Payment status
    pub is_paid: bool,
    pub total_price: f64,

    /// Globally unique human-readable subdomain
    pub subdomain: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial-update payload for a website setup
///
/// Absent fields keep their prior values. `template_id` is a double-`Option`
/// slot: `null` clears the template, absence leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebsiteSetupUpdate {
    pub review_system: Option<bool>,
    pub ai_chatbot: Option<bool>,
    pub ambulance_ordering: Option<bool>,
    pub patient_portal: Option<bool>,
    pub prescription_refill: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::double_option"
    )]
    pub template_id: Option<Option<i64>>,
    pub is_paid: Option<bool>,
    pub total_price: Option<f64>,
    pub subdomain: Option<String>,
}

impl WebsiteSetupUpdate {
    /// Apply this patch to a record, leaving absent fields unchanged
    pub fn apply(&self, setup: &mut WebsiteSetup) {
        if let Some(v) = self.review_system {
            setup.review_system = v;
        }
        if let Some(v) = self.ai_chatbot {
            setup.ai_chatbot = v;
        }
        if let Some(v) = self.ambulance_ordering {
            setup.ambulance_ordering = v;
        }
        if let Some(v) = self.patient_portal {
            setup.patient_portal = v;
        }
        if let Some(v) = self.prescription_refill {
            setup.prescription_refill = v;
        }
        if let Some(v) = self.template_id {
            setup.template_id = v;
        }
        if let Some(v) = self.is_paid {
            setup.is_paid = v;
        }
        if let Some(v) = self.total_price {
            setup.total_price = v;
        }
        if let Some(ref v) = self.subdomain {
            setup.subdomain = Some(v.clone());
        }
    }
}
