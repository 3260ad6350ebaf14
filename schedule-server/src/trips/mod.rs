//! Trip aggregation: segment search, display shaping, stale-response
//! guarding.

mod aggregator;
mod format;
mod session;

pub use aggregator::TripAggregator;
pub use format::{carrier_display_title, date_label, duration_label, parse_instant, time_of_day};
pub use session::SearchSession;
