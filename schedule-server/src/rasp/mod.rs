//! Schedules API client.
//!
//! This module wraps the journey-planning HTTP API the app is built on.
//!
//! Key characteristics of the API:
//! - Authentication is a static `apikey` query parameter
//! - `/stations_list/` returns the entire world directory in one
//!   multi-megabyte document; it changes rarely and is fetched once per
//!   process (see `directory::DirectoryCache`)
//! - Timestamps come in two shapes: `"YYYY-MM-DD HH:mm:ss"` and ISO 8601
//!   with a `T` separator, with or without a UTC offset
//! - Fields are omitted rather than sent as null, so the DTOs are
//!   deliberately tolerant

mod client;
mod error;
mod types;

pub use client::{RaspClient, RaspConfig};
pub use error::RaspError;
pub use types::{
    AllStationsResponse, Carrier, Country, IntervalSegment, Place, Region, SearchResponse,
    Segment, Settlement, StationCodes, StationEntry, Thread,
};
