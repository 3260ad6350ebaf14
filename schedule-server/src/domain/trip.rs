//! Trip display records.

use chrono::NaiveDateTime;

/// A display-ready trip between two stations.
///
/// Constructed fresh for each search response, owned by the requesting
/// caller for as long as the result screen lives, and never cached
/// across searches.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Carrier name, first slash-separated variant, trimmed.
    pub carrier_title: String,

    /// Carrier logo URL.
    pub carrier_logo: Option<String>,

    /// Provider carrier code.
    pub carrier_code: Option<i64>,

    /// Departure time of day, "HH:mm".
    pub departure_time: String,

    /// Arrival time of day, "HH:mm".
    pub arrival_time: String,

    /// Whole-hour duration with a Russian unit, e.g. "2 часа".
    pub duration_label: String,

    /// Departure date, "<day> <genitive month>", e.g. "14 января".
    pub date_label: String,

    /// Parsed departure instant used for ordering. Display strings are
    /// never compared: "00:05" must sort after "23:50" of the previous
    /// day.
    pub sort_instant: NaiveDateTime,

    pub has_transfers: bool,

    /// Short transfer annotation when `has_transfers` is set.
    pub transfer_note: Option<String>,
}
