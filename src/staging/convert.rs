//! Field-level text conversion for staged records.
//!
//! All functions here are total: any raw text yields a value, never an error.
//! Whether a `None` result rejects the row is decided by the loader, based on
//! the column's nullability.

use chrono::NaiveDate;

/// Raw texts accepted as an affirmative flag, compared case-insensitively
/// after trimming.
const TRUE_FLAGS: &[&str] = &["1", "y", "yes", "true"];

/// Date format accepted for staged date columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a boolean-semantic flag column.
///
/// Trimmed, case-insensitive "1", "Y", "Yes" and "True" map to `true`.
/// Everything else maps to `false`, including empty and unrecognised text,
/// which is therefore indistinguishable from an explicit "No". Upstream
/// feeds only guarantee an affirmative marker for active rows.
pub fn parse_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    TRUE_FLAGS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Parse an ISO `YYYY-MM-DD` date column. Unparseable or empty text yields
/// `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parse an integer column. Unparseable or empty text yields `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
