//! Stale-response guarding for repeated searches.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{FilterCriteria, StationCode, TripRecord};
use crate::rasp::RaspError;

use super::aggregator::TripAggregator;

/// Serializes result publication for a screen's repeated searches.
///
/// Superseded searches are not cancelled in flight. Instead every run
/// takes a monotonically increasing token before the network call, and a
/// completed response replaces the held snapshot only if no newer run
/// has published since — a slow stale response can never overwrite
/// fresher data. The caller always receives its own result either way.
pub struct SearchSession {
    aggregator: TripAggregator,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    next_token: u64,
    published_token: u64,
    latest: Option<Arc<Vec<TripRecord>>>,
}

impl SearchSession {
    pub fn new(aggregator: TripAggregator) -> Self {
        Self {
            aggregator,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Run a search and publish its result unless it has gone stale.
    pub async fn run(
        &self,
        from: &StationCode,
        to: &StationCode,
        filters: &FilterCriteria,
    ) -> Result<Arc<Vec<TripRecord>>, RaspError> {
        let token = self.begin().await;
        let trips = Arc::new(self.aggregator.search(from, to, filters).await?);
        self.publish(token, trips.clone()).await;
        Ok(trips)
    }

    /// The most recently published snapshot, if any.
    pub async fn latest(&self) -> Option<Arc<Vec<TripRecord>>> {
        self.state.lock().await.latest.clone()
    }

    /// Drop the held snapshot (the results screen was left).
    ///
    /// Tokens stay monotonic across clears so an in-flight search from
    /// before the clear still publishes correctly.
    pub async fn clear(&self) {
        self.state.lock().await.latest = None;
    }

    async fn begin(&self) -> u64 {
        let mut state = self.state.lock().await;
        state.next_token += 1;
        state.next_token
    }

    async fn publish(&self, token: u64, trips: Arc<Vec<TripRecord>>) -> bool {
        let mut state = self.state.lock().await;
        if token > state.published_token {
            state.published_token = token;
            state.latest = Some(trips);
            true
        } else {
            debug!(
                token,
                published = state.published_token,
                "discarding stale search result"
            );
            false
        }
    }
}
