//! Core value types shared across the crate.

mod filter;
mod station;
mod trip;

pub use filter::{FilterCriteria, TimeWindow, TransfersPreference};
pub use station::{InvalidStationCode, ResolvedCity, ResolvedStation, StationCode};
pub use trip::TripRecord;
