//! Trip search and aggregation.
//!
//! Fetches candidate trips between two station codes and shapes them
//! into display-ready, filtered, sorted records. Segments missing a
//! required field are silently dropped rather than failing the search.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use tracing::debug;

use crate::domain::{FilterCriteria, StationCode, TripRecord};
use crate::rasp::{IntervalSegment, RaspClient, RaspError, Segment};

use super::format::{carrier_display_title, date_label, duration_label, parse_instant, time_of_day};

/// Shown when the upstream omits the carrier name.
const UNKNOWN_CARRIER: &str = "Неизвестный перевозчик";

/// Annotation on trips whose itinerary includes transfers.
const TRANSFER_NOTE: &str = "С пересадками";

/// Aggregates rail segments into display-ready trip records.
#[derive(Clone)]
pub struct TripAggregator {
    client: RaspClient,
}

impl TripAggregator {
    pub fn new(client: RaspClient) -> Self {
        Self { client }
    }

    /// Search trips between two station codes.
    ///
    /// Issues one rail-restricted segment-search request, maps plain and
    /// interval segments, applies the departure-window filter and sorts
    /// ascending by the parsed departure instant.
    pub async fn search(
        &self,
        from: &StationCode,
        to: &StationCode,
        filters: &FilterCriteria,
    ) -> Result<Vec<TripRecord>, RaspError> {
        let response = self
            .client
            .search(from, to, filters.transfers_param())
            .await?;

        let now = Local::now().naive_local();
        let mut trips: Vec<TripRecord> = Vec::new();
        trips.extend(
            response
                .segments
                .iter()
                .filter_map(|segment| trip_from_segment(segment, now)),
        );
        trips.extend(
            response
                .interval_segments
                .iter()
                .filter_map(|segment| trip_from_interval(segment, now)),
        );

        trips.retain(|trip| filters.admits_hour(trip.sort_instant.hour()));
        trips.sort_by_key(|trip| trip.sort_instant);

        debug!(
            from = %from,
            to = %to,
            segments = response.segments.len(),
            intervals = response.interval_segments.len(),
            trips = trips.len(),
            "aggregated trips"
        );
        Ok(trips)
    }
}

/// Map a plain segment. Departure, arrival, duration and carrier are all
/// required; a segment missing any of them is dropped, not an error.
fn trip_from_segment(segment: &Segment, now: NaiveDateTime) -> Option<TripRecord> {
    let departure = segment.departure.as_deref()?;
    let arrival = segment.arrival.as_deref()?;
    let duration = segment.duration?;
    let carrier = segment.thread.as_ref()?.carrier.as_ref()?;

    Some(TripRecord {
        carrier_title: carrier_display_title(carrier.title.as_deref().unwrap_or(UNKNOWN_CARRIER)),
        carrier_logo: carrier.logo.clone(),
        carrier_code: carrier.code,
        departure_time: time_of_day(departure),
        arrival_time: time_of_day(arrival),
        duration_label: duration_label(duration),
        date_label: date_label(departure, now.date()),
        sort_instant: parse_instant(departure).unwrap_or(now),
        has_transfers: false,
        transfer_note: None,
    })
}

/// Map an interval segment: the transfer flag comes from the explicit
/// response field, never inferred. Entries without a parseable departure
/// have no sort instant and are dropped; a missing arrival is derived
/// from departure plus duration.
fn trip_from_interval(segment: &IntervalSegment, now: NaiveDateTime) -> Option<TripRecord> {
    let departure = segment.departure.as_deref()?;
    let duration = segment.duration?;
    let carrier = segment.thread.as_ref()?.carrier.as_ref()?;
    let sort_instant = parse_instant(departure)?;

    let arrival_time = match segment.arrival.as_deref() {
        Some(arrival) => time_of_day(arrival),
        None => (sort_instant + Duration::seconds(duration))
            .format("%H:%M")
            .to_string(),
    };

    let has_transfers = segment.has_transfers.unwrap_or(false);
    Some(TripRecord {
        carrier_title: carrier_display_title(carrier.title.as_deref().unwrap_or(UNKNOWN_CARRIER)),
        carrier_logo: carrier.logo.clone(),
        carrier_code: carrier.code,
        departure_time: time_of_day(departure),
        arrival_time,
        duration_label: duration_label(duration),
        date_label: date_label(departure, now.date()),
        sort_instant,
        has_transfers,
        transfer_note: has_transfers.then(|| TRANSFER_NOTE.to_string()),
    })
}
