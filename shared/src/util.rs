//! Shared utility functions

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Normalize an email address for storage and lookup (trim + lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derive the default subdomain from an email address: the local part
/// before '@', lowercased. Returns the whole string if no '@' is present.
pub fn subdomain_from_email(email: &str) -> String {
    let normalized = normalize_email(email);
    normalized
        .split('@')
        .next()
        .unwrap_or(normalized.as_str())
        .to_string()
}
