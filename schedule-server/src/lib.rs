//! Suburban train schedule server.
//!
//! Resolves cities and stations from the Yandex Rasp station directory
//! and searches train trips between two stations, with filtering by
//! time of day and transfer preference.

pub mod directory;
pub mod domain;
pub mod rasp;
pub mod reachability;
pub mod trips;
pub mod web;
