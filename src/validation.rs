use chrono::NaiveDate;

use crate::error::{CleanerError, CleanerResult};

/// Parses a `YYYY-MM-DD` date. Blank input means "unset" and yields `None`.
pub fn optional_date(value: Option<&str>, field: &str) -> CleanerResult<Option<NaiveDate>> {
    match trim_optional(value) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| CleanerError::InvalidDate {
                field: field.to_string(),
                value: s,
            }),
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// True when the value is absent or an empty string.
pub fn is_unset(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
