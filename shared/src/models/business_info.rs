//! Business info model (singleton per website setup)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weekly working hours: lowercase weekday name → that day's schedule
pub type WorkingHours = BTreeMap<String, DayHours>;

/// Opening schedule for a single weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    /// Opening time, "HH:MM"
    #[serde(default)]
    pub open: Option<String>,
    /// Closing time, "HH:MM"
    #[serde(default)]
    pub close: Option<String>,
    /// Closed all day
    #[serde(default)]
    pub closed: bool,
}

/// Business profile entity, exactly one per website setup
///
/// Created lazily on first read or write; all descriptive fields default to
/// empty. `is_published` only changes through the explicit publish
/// transition, never through field updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub id: String,
    pub setup_id: String,

    pub name: String,
    pub about: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_phone: String,
    pub contact_email: String,
    pub website: String,
    pub working_hours: WorkingHours,
    pub is_published: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial-update payload for business info
///
/// Absent fields keep their prior values. `latitude`/`longitude` are
/// double-`Option` slots so coordinates can be cleared with an explicit
/// `null`. Publishing is a separate transition and deliberately has no slot
/// here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessInfoUpdate {
    pub name: Option<String>,
    pub about: Option<String>,
    pub address: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::double_option"
    )]
    pub latitude: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::models::double_option"
    )]
    pub longitude: Option<Option<f64>>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub working_hours: Option<WorkingHours>,
}

impl BusinessInfoUpdate {
    /// Apply this patch to a record, leaving absent fields unchanged
    pub fn apply(&self, info: &mut BusinessInfo) {
        if let Some(ref v) = self.name {
            info.name = v.clone();
        }
        if let Some(ref v) = self.about {
            info.about = v.clone();
        }
        if let Some(ref v) = self.address {
            info.address = v.clone();
        }
        if let Some(v) = self.latitude {
            info.latitude = v;
        }
        if let Some(v) = self.longitude {
            info.longitude = v;
        }
        if let Some(ref v) = self.contact_phone {
            info.contact_phone = v.clone();
        }
        if let Some(ref v) = self.contact_email {
            info.contact_email = v.clone();
        }
        if let Some(ref v) = self.website {
            info.website = v.clone();
        }
        if let Some(ref v) = self.working_hours {
            info.working_hours = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BusinessInfo {
        BusinessInfo {
            id: "bi1".into(),
            setup_id: "ws1".into(),
            name: "City Pharmacy".into(),
            about: "Open since 1998".into(),
            address: "1 Main St".into(),
            latitude: Some(40.0),
            longitude: Some(-3.5),
            contact_phone: "".into(),
            contact_email: "".into(),
            website: "".into(),
            working_hours: WorkingHours::new(),
            is_published: false,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn test_apply_single_field_keeps_rest() {
        let mut info = sample();
        let patch: BusinessInfoUpdate =
            serde_json::from_str(r#"{"contact_phone": "+1234567890"}"#).unwrap();
        patch.apply(&mut info);
        assert_eq!(info.contact_phone, "+1234567890");
        assert_eq!(info.name, "City Pharmacy");
        assert_eq!(info.about, "Open since 1998");
        assert_eq!(info.latitude, Some(40.0));
    }

    #[test]
    fn test_coordinates_cleared_by_null() {
        let mut info = sample();
        let patch: BusinessInfoUpdate =
            serde_json::from_str(r#"{"latitude": null, "longitude": null}"#).unwrap();
        patch.apply(&mut info);
        assert_eq!(info.latitude, None);
        assert_eq!(info.longitude, None);
    }

    #[test]
    fn test_working_hours_round_trip() {
        let json = r#"{"monday": {"open": "09:00", "close": "18:00", "closed": false},
                       "sunday": {"closed": true}}"#;
        let hours: WorkingHours = serde_json::from_str(json).unwrap();
        assert_eq!(hours["monday"].open.as_deref(), Some("09:00"));
        assert!(hours["sunday"].closed);
        assert_eq!(hours["sunday"].open, None);

        let back = serde_json::to_string(&hours).unwrap();
        let again: WorkingHours = serde_json::from_str(&back).unwrap();
        assert_eq!(hours, again);
    }

    #[test]
    fn test_patch_has_no_publish_slot() {
        // Setting is_published through the update payload must be impossible;
        // unknown fields are simply ignored by the deserializer.
        let patch: BusinessInfoUpdate =
            serde_json::from_str(r#"{"is_published": true, "name": "X"}"#).unwrap();
        let mut info = sample();
        patch.apply(&mut info);
        assert!(!info.is_published);
        assert_eq!(info.name, "X");
    }
}
