//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    FilterCriteria, ResolvedCity, ResolvedStation, TimeWindow, TransfersPreference, TripRecord,
};

/// Request for the station picker.
#[derive(Debug, Deserialize)]
pub struct StationsRequest {
    /// Free-text city name
    pub city: String,
}

/// Request to search trips.
#[derive(Debug, Deserialize)]
pub struct SearchTripsRequest {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,

    /// Comma-separated window names, e.g. "morning,evening"
    pub time_windows: Option<String>,

    /// "yes" / "no"; absent means no preference
    pub transfers: Option<String>,
}

impl SearchTripsRequest {
    /// Parse the filter parameters into criteria.
    pub fn filter_criteria(&self) -> Result<FilterCriteria, String> {
        let mut criteria = FilterCriteria::default();

        if let Some(windows) = self.time_windows.as_deref() {
            for name in windows.split(',').filter(|name| !name.is_empty()) {
                let window = TimeWindow::parse(name)
                    .ok_or_else(|| format!("unknown time window: {name}"))?;
                criteria.time_windows.insert(window);
            }
        }

        criteria.transfers = match self.transfers.as_deref() {
            None => None,
            Some("yes") => Some(TransfersPreference::Yes),
            Some("no") => Some(TransfersPreference::No),
            Some(other) => return Err(format!("unknown transfers value: {other}")),
        };

        Ok(criteria)
    }
}

/// A city in picker results.
#[derive(Debug, Serialize)]
pub struct CityResult {
    pub title: String,
}

/// Response for the city picker.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<CityResult>,
}

/// A station in picker results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Display name with the city stripped
    pub title: String,

    /// Provider station code, when the station is searchable
    pub code: Option<String>,
}

/// Response for the station picker.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// A trip in search results.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub carrier: String,

    pub carrier_logo: Option<String>,

    pub carrier_code: Option<i64>,

    /// "HH:mm"
    pub departure_time: String,

    /// "HH:mm"
    pub arrival_time: String,

    /// e.g. "2 часа"
    pub duration: String,

    /// e.g. "14 января"
    pub date: String,

    pub has_transfers: bool,

    pub transfer_note: Option<String>,
}

/// Response for trip search.
#[derive(Debug, Serialize)]
pub struct TripsResponse {
    pub trips: Vec<TripResult>,
}

/// Response for the network status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// "online" or "offline"
    pub status: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl CityResult {
    pub fn from_city(city: &ResolvedCity) -> Self {
        Self {
            title: city.title.clone(),
        }
    }
}

impl StationResult {
    pub fn from_station(station: &ResolvedStation) -> Self {
        Self {
            title: station.title.clone(),
            code: station.code.as_ref().map(|code| code.as_str().to_string()),
        }
    }
}

impl TripResult {
    pub fn from_record(trip: &TripRecord) -> Self {
        Self {
            carrier: trip.carrier_title.clone(),
            carrier_logo: trip.carrier_logo.clone(),
            carrier_code: trip.carrier_code,
            departure_time: trip.departure_time.clone(),
            arrival_time: trip.arrival_time.clone(),
            duration: trip.duration_label.clone(),
            date: trip.date_label.clone(),
            has_transfers: trip.has_transfers,
            transfer_note: trip.transfer_note.clone(),
        }
    }
}
