//! Network reachability monitoring.
//!
//! Probes a lightweight URL on an interval and publishes state
//! transitions over a watch channel. Entering `Offline` requires several
//! consecutive probe failures so a momentary blip does not flash the
//! offline banner; a single success flips straight back to `Online`.
//! This is UX smoothing, not a correctness mechanism: actual fetches
//! carry their own error classification.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

/// Observed network state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Online,
    Offline,
}

/// Configuration for the reachability monitor.
#[derive(Debug, Clone)]
pub struct ReachabilityConfig {
    /// URL probed for liveness; any response counts as reachable.
    pub probe_url: String,

    /// Time between probes.
    pub interval: Duration,

    /// Per-probe timeout, deliberately short.
    pub timeout: Duration,

    /// Consecutive failed probes before publishing `Offline`.
    pub failure_threshold: u32,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            probe_url: "https://api.rasp.yandex.net/v3.0/".to_string(),
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(2),
            failure_threshold: 2,
        }
    }
}

/// Debounce for the offline transition.
struct Debounce {
    threshold: u32,
    failures: u32,
}

impl Debounce {
    fn new(threshold: u32) -> Self {
        // A threshold of zero would publish Offline before any probe ran.
        Self {
            threshold: threshold.max(1),
            failures: 0,
        }
    }

    fn observe(&mut self, reachable: bool) -> Reachability {
        if reachable {
            self.failures = 0;
            Reachability::Online
        } else {
            self.failures = self.failures.saturating_add(1);
            if self.failures >= self.threshold {
                Reachability::Offline
            } else {
                Reachability::Online
            }
        }
    }
}

/// Background reachability monitor.
///
/// Hands out watch subscriptions; dropping the monitor stops the probe
/// loop.
pub struct ReachabilityMonitor {
    rx: watch::Receiver<Reachability>,
    handle: tokio::task::JoinHandle<()>,
}

impl ReachabilityMonitor {
    /// Spawn the probe loop. Must be called from within a tokio runtime.
    pub fn spawn(config: ReachabilityConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let (tx, rx) = watch::channel(Reachability::Online);
        let handle = tokio::spawn(probe_loop(client, config, tx));

        Ok(Self { rx, handle })
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<Reachability> {
        self.rx.clone()
    }

    /// The current state.
    pub fn current(&self) -> Reachability {
        *self.rx.borrow()
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn probe_loop(
    client: reqwest::Client,
    config: ReachabilityConfig,
    tx: watch::Sender<Reachability>,
) {
    let mut interval = tokio::time::interval(config.interval);
    let mut debounce = Debounce::new(config.failure_threshold);

    loop {
        interval.tick().await;

        let reachable = client.get(&config.probe_url).send().await.is_ok();
        let state = debounce.observe(reachable);

        let changed = tx.send_if_modified(|current| {
            if *current != state {
                *current = state;
                true
            } else {
                false
            }
        });
        if changed {
            info!(?state, "reachability changed");
        } else {
            debug!(reachable, "probe");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_failure_does_not_go_offline() {
        let mut debounce = Debounce::new(2);
        assert_eq!(debounce.observe(false), Reachability::Online);
        assert_eq!(debounce.observe(false), Reachability::Offline);
    }

    #[test]
    fn one_success_recovers_immediately() {
        let mut debounce = Debounce::new(2);
        debounce.observe(false);
        debounce.observe(false);
        assert_eq!(debounce.observe(true), Reachability::Online);
        // The failure count also resets.
        assert_eq!(debounce.observe(false), Reachability::Online);
    }

    #[test]
    fn zero_threshold_is_clamped() {
        let mut debounce = Debounce::new(0);
        assert_eq!(debounce.observe(true), Reachability::Online);
        assert_eq!(debounce.observe(false), Reachability::Offline);
    }

    #[tokio::test]
    async fn monitor_reports_online_against_live_endpoint() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ping")
            .with_body("ok")
            .create_async()
            .await;

        let config = ReachabilityConfig {
            probe_url: format!("{}/ping", server.url()),
            interval: Duration::from_millis(10),
            timeout: Duration::from_secs(2),
            failure_threshold: 2,
        };
        let monitor = ReachabilityMonitor::spawn(config).unwrap();
        let mut rx = monitor.subscribe();

        // Starts Online and stays Online while probes succeed.
        assert_eq!(monitor.current(), Reachability::Online);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*rx.borrow_and_update(), Reachability::Online);
    }

    #[tokio::test]
    async fn monitor_goes_offline_after_consecutive_failures() {
        // Unroutable port: probes fail fast with a connect error.
        let config = ReachabilityConfig {
            probe_url: "http://127.0.0.1:1/".to_string(),
            interval: Duration::from_millis(10),
            timeout: Duration::from_millis(200),
            failure_threshold: 2,
        };
        let monitor = ReachabilityMonitor::spawn(config).unwrap();
        let mut rx = monitor.subscribe();

        rx.wait_for(|state| *state == Reachability::Offline)
            .await
            .unwrap();
        assert_eq!(monitor.current(), Reachability::Offline);
    }
}
