use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use schedule_server::directory::{DirectoryCache, DirectoryResolver};
use schedule_server::rasp::{RaspClient, RaspConfig};
use schedule_server::reachability::{ReachabilityConfig, ReachabilityMonitor};
use schedule_server::trips::{SearchSession, TripAggregator};
use schedule_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get credentials from environment
    let api_key = std::env::var("RASP_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: RASP_API_KEY not set. API calls will fail.");
        String::new()
    });

    // Create the provider client
    let config = RaspConfig::new(&api_key);
    let client = RaspClient::new(config).expect("Failed to create Rasp client");

    // Directory cache and resolver
    let cache = Arc::new(DirectoryCache::new(client.clone()));
    let directory = DirectoryResolver::new(cache);

    // Trip search session
    let session = SearchSession::new(TripAggregator::new(client));

    // Network status monitor
    let reachability = ReachabilityMonitor::spawn(ReachabilityConfig::default())
        .expect("Failed to create reachability monitor");

    // Build app state
    let state = AppState::new(directory, session, reachability);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Schedule server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health         - Health check");
    println!("  GET    /cities         - List cities with searchable stations");
    println!("  GET    /stations       - List stations of a city (?city=...)");
    println!("  GET    /search         - Search trips (?from=...&to=...)");
    println!("  GET    /search/latest  - Most recently published search result");
    println!("  DELETE /search/latest  - Drop the published search result");
    println!("  GET    /status         - Network reachability");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
