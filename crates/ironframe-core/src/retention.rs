//! Retention policy and sensitive-data masking

use regex::Regex;
use std::sync::LazyLock;

/// Seven-year retention window for GRC evidence
pub const RETENTION_PERIOD_DAYS: i64 = 2555;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").ok());

static SSN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").ok());

/// Replace email addresses and US social security numbers with placeholders.
pub fn mask_sensitive_data(input: &str) -> String {
    let mut masked = input.to_string();
    if let Some(re) = EMAIL_PATTERN.as_ref() {
        masked = re.replace_all(&masked, "[MASKED_EMAIL]").into_owned();
    }
    if let Some(re) = SSN_PATTERN.as_ref() {
        masked = re.replace_all(&masked, "[MASKED_SSN]").into_owned();
    }
    masked
}

/// Banner shown next to compliance frameworks
pub fn retention_status_label() -> String {
    format!("Retention Status: ACTIVE ({RETENTION_PERIOD_DAYS} days)")
}
