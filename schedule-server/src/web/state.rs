//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::DirectoryResolver;
use crate::reachability::ReachabilityMonitor;
use crate::trips::SearchSession;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// City/station resolver over the cached directory
    pub directory: Arc<DirectoryResolver>,

    /// Trip search with stale-response guarding
    pub session: Arc<SearchSession>,

    /// Network status event source
    pub reachability: Arc<ReachabilityMonitor>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        directory: DirectoryResolver,
        session: SearchSession,
        reachability: ReachabilityMonitor,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            session: Arc::new(session),
            reachability: Arc::new(reachability),
        }
    }
}
