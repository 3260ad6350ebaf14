//! Search result filters.

use std::collections::BTreeSet;

/// A time-of-day window for the departure hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeWindow {
    /// 06:00–12:00
    Morning,
    /// 12:00–18:00
    Day,
    /// 18:00–00:00
    Evening,
    /// 00:00–06:00
    Night,
}

impl TimeWindow {
    /// Whether an hour of day (0–23) falls inside this window.
    ///
    /// All windows are half-open: `[start, end)`.
    pub fn contains_hour(self, hour: u32) -> bool {
        match self {
            TimeWindow::Morning => (6..12).contains(&hour),
            TimeWindow::Day => (12..18).contains(&hour),
            TimeWindow::Evening => (18..24).contains(&hour),
            TimeWindow::Night => hour < 6,
        }
    }

    /// Parse a window name as used in query parameters.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(TimeWindow::Morning),
            "day" => Some(TimeWindow::Day),
            "evening" => Some(TimeWindow::Evening),
            "night" => Some(TimeWindow::Night),
            _ => None,
        }
    }
}

/// Transfer preference. `None` at the criteria level means unset, which
/// leaves the request's transfer parameter off entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransfersPreference {
    Yes,
    No,
}

/// User-selected result filters. Pure value, no identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected departure windows. Empty means "no restriction", not
    /// "exclude all".
    pub time_windows: BTreeSet<TimeWindow>,

    pub transfers: Option<TransfersPreference>,
}

impl FilterCriteria {
    /// Whether a trip departing at `hour` passes the window selection.
    pub fn admits_hour(&self, hour: u32) -> bool {
        self.time_windows.is_empty() || self.time_windows.iter().any(|w| w.contains_hour(hour))
    }

    /// The request-level `transfers` parameter value, when set.
    pub fn transfers_param(&self) -> Option<bool> {
        self.transfers
            .map(|t| matches!(t, TransfersPreference::Yes))
    }
}
