//! Station directory: process-wide cache and city/station resolution.

mod cache;
mod resolver;

pub use cache::{DirectoryCache, DirectoryResult};
pub use resolver::{
    DirectoryResolver, StationPolicy, compare_station_titles, contains_cyrillic, display_name,
    normalize_title,
};
