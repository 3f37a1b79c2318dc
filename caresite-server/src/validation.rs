//! Input validation
//!
//! Centralized field limits and validators. Unlike fail-fast checks, every
//! validator here records its violation into a [`FieldErrors`] accumulator
//! so one response can enumerate all invalid fields.

use chrono::NaiveTime;
use shared::error::AppError;
use shared::models::{BusinessInfoUpdate, WebsiteSetupUpdate, WorkingHours};
use std::collections::BTreeMap;
use validator::{ValidateEmail, ValidateUrl};

// ── Field limits ────────────────────────────────────────────────────

/// Display names: account, business
pub const MAX_NAME_LEN: usize = 255;

/// Long text: about, address
pub const MAX_TEXT_LEN: usize = 2000;

/// Contact phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Public website URLs
pub const MAX_URL_LEN: usize = 2048;

/// Subdomain labels
pub const MAX_SUBDOMAIN_LEN: usize = 63;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

// ── Error accumulator ───────────────────────────────────────────────

/// Per-field validation error accumulator
///
/// Collects `field → [messages]` and converts into a single
/// [`AppError::validation`] whose `details` map carries every violation.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if a violation was already recorded for this field
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Convert into an `AppError` listing every violating field, or `Ok(())`
    /// if nothing was recorded.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let mut err = AppError::validation("Validation failed");
        for (field, messages) in self.errors {
            err = err.with_detail(field, messages);
        }
        Err(err)
    }
}

// ── Field validators ────────────────────────────────────────────────

/// Required non-empty text within a length limit
pub fn check_required_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{field} must not be empty"));
    } else if value.len() > max_len {
        errors.add(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        );
    }
}

/// Optional text within a length limit (empty allowed)
pub fn check_text_len(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.len() > max_len {
        errors.add(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        );
    }
}

/// Required email shape
pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.len() > MAX_EMAIL_LEN || !value.validate_email() {
        errors.add(field, "Enter a valid email address.");
    }
}

/// Optional email shape (empty string clears the field)
pub fn check_optional_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.is_empty() {
        check_email(errors, field, value);
    }
}

/// Optional http(s) URL shape (empty string clears the field)
pub fn check_optional_url(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if value.len() > MAX_URL_LEN || !value.validate_url() {
        errors.add(field, "Enter a valid URL.");
    } else if !(value.starts_with("http://") || value.starts_with("https://")) {
        errors.add(field, "URL must use http or https.");
    }
}

/// Phone: limited length, digits plus `+ - ( )` and spaces
pub fn check_phone(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if value.len() > MAX_PHONE_LEN {
        errors.add(
            field,
            format!("{field} is too long ({} chars, max {MAX_PHONE_LEN})", value.len()),
        );
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        errors.add(field, "Enter a valid phone number.");
    }
}

/// Subdomain label: lowercase letters, digits, `-` and `.`
/// (dots occur in labels derived from email local parts)
pub fn check_subdomain(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.add(field, format!("{field} must not be empty"));
        return;
    }
    if value.len() > MAX_SUBDOMAIN_LEN {
        errors.add(
            field,
            format!("{field} is too long ({} chars, max {MAX_SUBDOMAIN_LEN})", value.len()),
        );
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.'))
    {
        errors.add(
            field,
            "Subdomain may only contain lowercase letters, digits, '-' and '.'",
        );
    }
}

/// Latitude/longitude within their valid ranges
pub fn check_coordinate(errors: &mut FieldErrors, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        errors.add(field, format!("{field} must be between {min} and {max}"));
    }
}

/// Working-hours map: known lowercase weekday keys, `HH:MM` times
pub fn check_working_hours(errors: &mut FieldErrors, field: &str, hours: &WorkingHours) {
    for (day, schedule) in hours {
        if !WEEKDAYS.contains(&day.as_str()) {
            errors.add(field, format!("Unknown day '{day}'"));
            continue;
        }
        for (label, time) in [("open", &schedule.open), ("close", &schedule.close)] {
            if let Some(t) = time
                && NaiveTime::parse_from_str(t, "%H:%M").is_err()
            {
                errors.add(field, format!("{day}.{label}: '{t}' is not a valid HH:MM time"));
            }
        }
    }
}

// ── Payload validators ──────────────────────────────────────────────

/// Validate a website-setup patch; reports every violation at once
pub fn validate_setup_update(update: &WebsiteSetupUpdate) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref subdomain) = update.subdomain {
        check_subdomain(&mut errors, "subdomain", subdomain);
    }
    if let Some(price) = update.total_price
        && (!price.is_finite() || price < 0.0)
    {
        errors.add("total_price", "total_price must be a non-negative number");
    }
    if let Some(Some(template_id)) = update.template_id
        && template_id < 0
    {
        errors.add("template_id", "template_id must be a non-negative integer");
    }
    errors.into_result()
}

/// Validate a business-info patch; reports every violation at once
pub fn validate_business_info_update(update: &BusinessInfoUpdate) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = update.name {
        check_text_len(&mut errors, "name", name, MAX_NAME_LEN);
    }
    if let Some(ref about) = update.about {
        check_text_len(&mut errors, "about", about, MAX_TEXT_LEN);
    }
    if let Some(ref address) = update.address {
        check_text_len(&mut errors, "address", address, MAX_TEXT_LEN);
    }
    if let Some(Some(lat)) = update.latitude {
        check_coordinate(&mut errors, "latitude", lat, -90.0, 90.0);
    }
    if let Some(Some(lon)) = update.longitude {
        check_coordinate(&mut errors, "longitude", lon, -180.0, 180.0);
    }
    if let Some(ref phone) = update.contact_phone {
        check_phone(&mut errors, "contact_phone", phone);
    }
    if let Some(ref email) = update.contact_email {
        check_optional_email(&mut errors, "contact_email", email);
    }
    if let Some(ref website) = update.website {
        check_optional_url(&mut errors, "website", website);
    }
    if let Some(ref hours) = update.working_hours {
        check_working_hours(&mut errors, "working_hours", hours);
    }
    errors.into_result()
}
