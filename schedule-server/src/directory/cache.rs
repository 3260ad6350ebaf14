//! Process-wide cache for the station directory.
//!
//! The directory is a multi-megabyte document that changes rarely, so it
//! is fetched at most once per process lifetime. Callers arriving while
//! a fetch is in flight all await the same shared future instead of
//! issuing duplicate requests. A failed fetch empties the slot again so
//! the next caller retries; the cache is never poisoned.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::rasp::{AllStationsResponse, RaspClient, RaspError};

/// Result of a directory fetch, cheaply cloneable to every waiter.
pub type DirectoryResult = Result<Arc<AllStationsResponse>, Arc<RaspError>>;

type SharedFetch = Shared<BoxFuture<'static, DirectoryResult>>;

enum Slot {
    Empty,
    InFlight(SharedFetch),
    Ready(Arc<AllStationsResponse>),
}

/// Memoizing async cache over `RaspClient::stations_list`.
///
/// Constructed once and injected wherever the directory is needed.
/// Guarantees at most one concurrent outstanding fetch.
pub struct DirectoryCache {
    client: RaspClient,
    slot: Mutex<Slot>,
}

impl DirectoryCache {
    /// Create an empty cache over the given client.
    pub fn new(client: RaspClient) -> Self {
        Self {
            client,
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Get the directory, fetching it on first use.
    ///
    /// All callers overlapping an in-flight fetch receive the same data
    /// or the same failure.
    pub async fn get(&self) -> DirectoryResult {
        let fetch = {
            let mut slot = self.slot.lock().await;
            match &*slot {
                Slot::Ready(directory) => return Ok(directory.clone()),
                Slot::InFlight(fetch) => fetch.clone(),
                Slot::Empty => {
                    debug!("directory not cached, starting fetch");
                    let client = self.client.clone();
                    let fetch: SharedFetch = async move {
                        client
                            .stations_list()
                            .await
                            .map(Arc::new)
                            .map_err(Arc::new)
                    }
                    .boxed()
                    .shared();
                    *slot = Slot::InFlight(fetch.clone());
                    fetch
                }
            }
        };

        let result = fetch.clone().await;

        // Publish the outcome, unless a newer fetch has already replaced
        // this one in the slot.
        let mut slot = self.slot.lock().await;
        if let Slot::InFlight(current) = &*slot
            && current.ptr_eq(&fetch)
        {
            *slot = match &result {
                Ok(directory) => Slot::Ready(directory.clone()),
                Err(e) => {
                    warn!(error = %e, "directory fetch failed, cache left empty");
                    Slot::Empty
                }
            };
        }

        result
    }

    /// Whether the directory has been fetched and cached.
    pub async fn is_populated(&self) -> bool {
        matches!(&*self.slot.lock().await, Slot::Ready(_))
    }
}
