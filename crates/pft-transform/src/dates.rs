//! Parsing of week headers and calendar date cells.

use chrono::{NaiveDate, NaiveDateTime};

/// Accepted `CalendarDate` spellings, tried in order.
/// Two-digit years come before four-digit ones: `%Y` also accepts `25`.
pub const CALENDAR_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Date-time spellings, truncated to their date. `%.f` also matches no
/// fraction at all.
const CALENDAR_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parses a week header such as `01/06/25`.
pub fn parse_week_header(header: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(header.trim(), format).ok()
}

/// Parses a calendar date cell in any of the accepted spellings.
///
/// Date-times are accepted and truncated to their date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    CALENDAR_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            CALENDAR_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
