//! City and station resolution over the cached directory.
//!
//! Translates a free-text city name into actionable station identifiers:
//! normalized title matching across a settlement's three title variants,
//! city-name stripping for station display names, and the
//! letters-before-digits ordering the pickers present.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{ResolvedCity, ResolvedStation, StationCode};
use crate::rasp::{AllStationsResponse, RaspError, Settlement};

use super::cache::DirectoryCache;

/// Filtering policy for station resolution.
///
/// The country restriction and the Cyrillic display-name check mirror the
/// product's current market. Both are configuration rather than
/// hard-wired behaviour so a different deployment can relax them.
#[derive(Debug, Clone)]
pub struct StationPolicy {
    /// Keep only settlements whose country title contains this substring.
    pub country_filter: Option<String>,

    /// Require at least one Cyrillic character in a station display name.
    /// Filters out transliteration artifacts and placeholder entries.
    pub require_cyrillic: bool,

    /// Transport tag a station must carry.
    pub transport_type: String,
}

impl Default for StationPolicy {
    fn default() -> Self {
        Self {
            country_filter: Some("Россия".to_string()),
            require_cyrillic: true,
            transport_type: "train".to_string(),
        }
    }
}

/// Resolves human-entered city names against the cached directory.
pub struct DirectoryResolver {
    cache: Arc<DirectoryCache>,
    policy: StationPolicy,
}

impl DirectoryResolver {
    /// Create a resolver with the default policy.
    pub fn new(cache: Arc<DirectoryCache>) -> Self {
        Self::with_policy(cache, StationPolicy::default())
    }

    /// Create a resolver with a custom policy.
    pub fn with_policy(cache: Arc<DirectoryCache>, policy: StationPolicy) -> Self {
        Self { cache, policy }
    }

    /// Every settlement title across the directory, deduplicated by exact
    /// string equality, in ascending lexicographic order.
    pub async fn all_cities(&self) -> Result<Vec<ResolvedCity>, Arc<RaspError>> {
        let directory = self.cache.get().await?;
        let cities = collect_cities(&directory);
        debug!(count = cities.len(), "resolved city list");
        Ok(cities)
    }

    /// Stations in the named city, filtered per the policy, deduplicated
    /// by display name and sorted letters-first.
    ///
    /// A trimmed-empty query returns an empty list without touching the
    /// network: it would otherwise match every settlement with a blank
    /// title variant and return stations from all over the directory.
    pub async fn stations_in_city(
        &self,
        city: &str,
    ) -> Result<Vec<ResolvedStation>, Arc<RaspError>> {
        if city.trim().is_empty() {
            return Ok(Vec::new());
        }

        let directory = self.cache.get().await?;
        let stations = collect_stations(&directory, city, &self.policy);
        debug!(city, count = stations.len(), "resolved stations");
        Ok(stations)
    }
}

/// Normalize a title for matching: spaces and hyphens stripped,
/// lowercased. "Нижний Новгород", "нижний-новгород" and
/// "НижнийНовгород" all map to the same key.
pub fn normalize_title(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether the string contains at least one Cyrillic character.
pub fn contains_cyrillic(value: &str) -> bool {
    value.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Derive a station display name by stripping the city out of the full
/// title.
///
/// `"Москва, Белорусский вокзал"` → `"Белорусский вокзал"`,
/// `"Москва (Казанский вокзал)"` → `"Казанский вокзал"`, and a plain
/// city-name prefix is stripped as a fallback.
pub fn display_name(full_title: &str, city_title: &str) -> String {
    let full = full_title.trim();

    if let Some((_, rest)) = full.split_once(',') {
        return rest.trim().to_string();
    }

    if let (Some(open), Some(close)) = (full.find('('), full.rfind(')'))
        && open < close
    {
        return full[open + 1..close].trim().to_string();
    }

    if let Some(rest) = full.strip_prefix(city_title) {
        let rest = rest.trim_start_matches([' ', '-']).trim();
        if !rest.is_empty() {
            return rest.to_string();
        }
    }

    full.to_string()
}

/// Ordering for station display names: entries starting with a letter
/// sort before entries starting with a digit; lexicographic within each
/// group.
pub fn compare_station_titles(a: &str, b: &str) -> Ordering {
    let digit_first = |s: &str| s.chars().next().is_some_and(|c| c.is_ascii_digit());
    digit_first(a)
        .cmp(&digit_first(b))
        .then_with(|| a.cmp(b))
}

fn collect_cities(directory: &AllStationsResponse) -> Vec<ResolvedCity> {
    let mut titles = BTreeSet::new();
    for country in &directory.countries {
        for region in &country.regions {
            for settlement in &region.settlements {
                if let Some(title) = settlement.title.as_deref()
                    && !title.trim().is_empty()
                {
                    titles.insert(title.to_string());
                }
            }
        }
    }
    titles
        .into_iter()
        .map(|title| ResolvedCity { title })
        .collect()
}

fn settlement_matches(settlement: &Settlement, target: &str) -> bool {
    [
        settlement.title.as_deref(),
        settlement.popular_title.as_deref(),
        settlement.short_title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|title| normalize_title(title) == target)
}

fn collect_stations(
    directory: &AllStationsResponse,
    city: &str,
    policy: &StationPolicy,
) -> Vec<ResolvedStation> {
    let query = city.trim();
    let target = normalize_title(query);

    let mut seen = HashSet::new();
    let mut stations = Vec::new();

    for country in &directory.countries {
        if let Some(filter) = &policy.country_filter {
            let country_title = country.title.as_deref().unwrap_or("");
            if !country_title.contains(filter.as_str()) {
                continue;
            }
        }
        for region in &country.regions {
            for settlement in &region.settlements {
                if !settlement_matches(settlement, &target) {
                    continue;
                }
                let city_title = settlement.title.as_deref().unwrap_or(query);
                for station in &settlement.stations {
                    if station.transport_type.as_deref() != Some(policy.transport_type.as_str()) {
                        continue;
                    }
                    let Some(raw_code) = station
                        .codes
                        .as_ref()
                        .and_then(|codes| codes.yandex_code.as_deref())
                        .filter(|code| !code.is_empty())
                    else {
                        continue;
                    };
                    let Ok(code) = StationCode::parse(raw_code) else {
                        continue;
                    };

                    let full_title = station
                        .title
                        .as_deref()
                        .or(station.short_title.as_deref())
                        .unwrap_or("");
                    let title = display_name(full_title, city_title);
                    if title.is_empty() {
                        continue;
                    }
                    if policy.require_cyrillic && !contains_cyrillic(&title) {
                        continue;
                    }

                    // First occurrence wins.
                    if seen.insert(title.clone()) {
                        stations.push(ResolvedStation {
                            title,
                            code: Some(code),
                        });
                    }
                }
            }
        }
    }

    stations.sort_by(|a, b| compare_station_titles(&a.title, &b.title));
    stations
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Case changes and inserted spaces/hyphens never change the
        /// normalized key.
        #[test]
        fn normalization_collapses_variants(base in "[а-я]{1,12}") {
            let spaced: String = base.chars().flat_map(|c| [c, ' ']).collect();
            let hyphened: String = base.chars().flat_map(|c| [c, '-']).collect();
            let upper = base.to_uppercase();

            let key = normalize_title(&base);
            prop_assert_eq!(normalize_title(&spaced), key.clone());
            prop_assert_eq!(normalize_title(&hyphened), key.clone());
            prop_assert_eq!(normalize_title(&upper), key);
        }

        /// Normalized output never contains spaces, hyphens or uppercase.
        #[test]
        fn normalized_is_canonical(s in "[А-Яа-яA-Za-z0-9 \\-]{0,24}") {
            let normalized = normalize_title(&s);
            prop_assert!(!normalized.contains(' '));
            prop_assert!(!normalized.contains('-'));
            prop_assert_eq!(normalized.clone(), normalized.to_lowercase());
        }
    }
}
