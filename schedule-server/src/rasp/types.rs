//! Schedules API response DTOs.
//!
//! These types map to the JSON documents returned by the schedules API.
//! Every field the upstream may omit is an `Option` or a defaulted
//! collection, so a partial document decodes to fewer results instead of
//! failing the whole request.

use serde::Deserialize;

/// Response from `/stations_list/`: the full station directory,
/// countries down to individual stations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllStationsResponse {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Country {
    pub title: Option<String>,

    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Region {
    pub title: Option<String>,

    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// A city/town entry in the directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settlement {
    /// Canonical title, e.g. "Санкт-Петербург".
    pub title: Option<String>,

    /// Colloquial alternate title, e.g. "Питер".
    pub popular_title: Option<String>,

    /// Abbreviated alternate title, e.g. "СПб".
    pub short_title: Option<String>,

    #[serde(default)]
    pub stations: Vec<StationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationEntry {
    pub title: Option<String>,

    pub short_title: Option<String>,

    /// Transport tag: "train", "suburban", "bus", ...
    pub transport_type: Option<String>,

    pub codes: Option<StationCodes>,
}

/// Code map for a station. Only the provider's own code is needed to
/// query segments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationCodes {
    pub yandex_code: Option<String>,
}

/// Response from `/search/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// Multi-leg itinerary entries returned alongside plain segments,
    /// each carrying its own transfer flag.
    #[serde(default)]
    pub interval_segments: Vec<IntervalSegment>,
}

/// One scheduled journey leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    /// Departure timestamp, "YYYY-MM-DD HH:mm:ss" or ISO 8601.
    pub departure: Option<String>,

    /// Arrival timestamp, same shapes as `departure`.
    pub arrival: Option<String>,

    /// Journey duration in seconds.
    pub duration: Option<i64>,

    pub thread: Option<Thread>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntervalSegment {
    pub from: Option<Place>,

    pub to: Option<Place>,

    pub departure: Option<String>,

    pub arrival: Option<String>,

    /// Journey duration in seconds.
    pub duration: Option<i64>,

    pub thread: Option<Thread>,

    /// Explicit transfer flag; never inferred.
    pub has_transfers: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thread {
    pub carrier: Option<Carrier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Carrier {
    /// May join localized names with a slash, e.g. "РЖД/RZD".
    pub title: Option<String>,

    /// Logo URL.
    pub logo: Option<String>,

    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_directory_document_decodes() {
        let body = r#"{
            "countries": [{
                "title": "Россия",
                "regions": [{
                    "title": "Москва и Московская область",
                    "settlements": [{
                        "title": "Москва",
                        "popular_title": "Москва",
                        "short_title": "Мск",
                        "stations": [{
                            "title": "Москва (Казанский вокзал)",
                            "short_title": "Казанский вокзал",
                            "transport_type": "train",
                            "codes": {"yandex_code": "s2000003"}
                        }]
                    }]
                }]
            }]
        }"#;

        let parsed: AllStationsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.countries.len(), 1);
        let station = &parsed.countries[0].regions[0].settlements[0].stations[0];
        assert_eq!(station.transport_type.as_deref(), Some("train"));
        assert_eq!(
            station.codes.as_ref().unwrap().yandex_code.as_deref(),
            Some("s2000003")
        );
    }

    #[test]
    fn partial_directory_degrades_to_empty_collections() {
        // Missing regions, settlements, stations and codes must all
        // decode rather than error.
        let body = r#"{
            "countries": [
                {"title": "Россия"},
                {"regions": [{"settlements": [{"title": "Тверь"}]}]},
                {"regions": [{"settlements": [{"stations": [{"title": "X"}]}]}]}
            ]
        }"#;

        let parsed: AllStationsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.countries.len(), 3);
        assert!(parsed.countries[0].regions.is_empty());
        assert!(parsed.countries[1].regions[0].settlements[0].stations.is_empty());
        let bare = &parsed.countries[2].regions[0].settlements[0].stations[0];
        assert!(bare.transport_type.is_none());
        assert!(bare.codes.is_none());
    }

    #[test]
    fn empty_object_is_an_empty_directory() {
        let parsed: AllStationsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.countries.is_empty());
    }

    #[test]
    fn search_response_decodes_segments_and_intervals() {
        let body = r#"{
            "segments": [{
                "departure": "2024-01-14 22:30:00",
                "arrival": "2024-01-15 06:10:00",
                "duration": 27600,
                "thread": {"carrier": {"title": "РЖД/RZD", "logo": "https://example.com/rzd.svg", "code": 112}}
            }],
            "interval_segments": [{
                "from": {"title": "Москва"},
                "to": {"title": "Тверь"},
                "departure": "2024-01-14 08:00:00",
                "duration": 7200,
                "thread": {"carrier": {"title": "МТППК"}},
                "has_transfers": true
            }]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.segments.len(), 1);
        assert_eq!(parsed.segments[0].duration, Some(27600));
        assert_eq!(parsed.interval_segments.len(), 1);
        assert_eq!(parsed.interval_segments[0].has_transfers, Some(true));
        assert!(parsed.interval_segments[0].arrival.is_none());
    }

    #[test]
    fn search_response_tolerates_missing_sections() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.segments.is_empty());
        assert!(parsed.interval_segments.is_empty());

        let parsed: SearchResponse =
            serde_json::from_str(r#"{"segments": [{}, {"duration": 60}]}"#).unwrap();
        assert_eq!(parsed.segments.len(), 2);
        assert!(parsed.segments[0].departure.is_none());
    }
}
