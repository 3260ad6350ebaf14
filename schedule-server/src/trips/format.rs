//! Display formatting for trip records.
//!
//! The upstream emits timestamps in two shapes, `"YYYY-MM-DD HH:mm:ss"`
//! and ISO 8601 with a `T` separator (with or without a UTC offset), and
//! occasionally a bare `"HH:mm:ss"`. All formatting here works on those
//! raw strings and degrades to something presentable rather than erroring.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Genitive month names for the "<day> <month>" date label.
const MONTH_NAMES: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Extract "HH:mm" from an upstream timestamp.
///
/// Takes the substring after the date/time separator (space or `T`) and
/// keeps only hour and minute. A string without a recognizable time part
/// is returned as-is.
pub fn time_of_day(timestamp: &str) -> String {
    let time_part = timestamp
        .rsplit_once([' ', 'T'])
        .map(|(_, t)| t)
        .unwrap_or(timestamp);

    let mut parts = time_part.split(':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) => format!("{hours}:{minutes}"),
        _ => time_part.to_string(),
    }
}

/// Whole-hour duration with a Russian unit suffix: "1 час", "2 часа",
/// "11 часов".
pub fn duration_label(duration_secs: i64) -> String {
    let hours = duration_secs / 3600;
    format!("{hours} {}", pluralize_hours(hours))
}

fn pluralize_hours(value: i64) -> &'static str {
    let tail = value % 100;
    if (11..=14).contains(&tail) {
        return "часов";
    }
    match tail % 10 {
        1 => "час",
        2..=4 => "часа",
        _ => "часов",
    }
}

/// Parse an upstream timestamp into a naive instant for sorting.
///
/// Offsets, when present, are parsed and then dropped: ordering within
/// one result list over local station wall time is what matters.
pub fn parse_instant(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S").ok())
}

/// "<day> <genitive month>" from the timestamp's date part, e.g.
/// "14 января". Falls back to `today` when the timestamp cannot be
/// parsed.
pub fn date_label(timestamp: &str, today: NaiveDate) -> String {
    let date = parse_instant(timestamp)
        .map(|instant| instant.date())
        .unwrap_or(today);
    format!("{} {}", date.day(), MONTH_NAMES[date.month0() as usize])
}

/// Carrier titles sometimes join localized names with a slash
/// ("РЖД/RZD"); keep the first, trimmed.
pub fn carrier_display_title(raw: &str) -> String {
    raw.split('/').next().unwrap_or(raw).trim().to_string()
}
