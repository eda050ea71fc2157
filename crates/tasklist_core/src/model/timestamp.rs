//! RFC 3339 timestamp helpers.
//!
//! Stored timestamps are plain text so records written by older clients (or
//! edited by hand) still load. Parsing never fails loudly: unparseable text
//! is reported as `None` and callers pick their own fallback.

use chrono::{DateTime, SecondsFormat, Utc};

/// Parses stored timestamp text into UTC.
///
/// Accepts RFC 3339 with any offset. Returns `None` for blank or malformed
/// input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

/// Formats a UTC instant in the canonical stored shape
/// (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
