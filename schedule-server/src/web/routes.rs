//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::domain::StationCode;
use crate::rasp::RaspError;
use crate::reachability::Reachability;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cities", get(list_cities))
        .route("/stations", get(list_stations))
        .route("/search", get(search_trips))
        .route("/search/latest", get(latest_trips).delete(clear_trips))
        .route("/status", get(network_status))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all cities that have at least one searchable station.
async fn list_cities(State(state): State<AppState>) -> Result<Json<CitiesResponse>, AppError> {
    let cities = state.directory.all_cities().await?;
    let cities = cities.iter().map(CityResult::from_city).collect();
    Ok(Json(CitiesResponse { cities }))
}

/// List the stations of one city, matched by free-text name.
async fn list_stations(
    State(state): State<AppState>,
    Query(req): Query<StationsRequest>,
) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.directory.stations_in_city(&req.city).await?;
    let stations = stations.iter().map(StationResult::from_station).collect();
    Ok(Json(StationsResponse { stations }))
}

/// Search trips between two stations and publish the result.
async fn search_trips(
    State(state): State<AppState>,
    Query(req): Query<SearchTripsRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let from = StationCode::parse(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("invalid origin code: {e}"),
    })?;
    let to = StationCode::parse(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("invalid destination code: {e}"),
    })?;
    let filters = req
        .filter_criteria()
        .map_err(|message| AppError::BadRequest { message })?;

    let trips = state.session.run(&from, &to, &filters).await?;
    let trips = trips.iter().map(TripResult::from_record).collect();
    Ok(Json(TripsResponse { trips }))
}

/// The most recently published search result.
async fn latest_trips(State(state): State<AppState>) -> Json<TripsResponse> {
    let trips = state
        .session
        .latest()
        .await
        .map(|snapshot| snapshot.iter().map(TripResult::from_record).collect())
        .unwrap_or_default();
    Json(TripsResponse { trips })
}

/// Drop the published search snapshot (the result screen was left).
async fn clear_trips(State(state): State<AppState>) -> StatusCode {
    state.session.clear().await;
    StatusCode::NO_CONTENT
}

/// Current network reachability.
async fn network_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = match state.reachability.current() {
        Reachability::Online => "online",
        Reachability::Offline => "offline",
    };
    Json(StatusResponse { status })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Offline { message: String },
    Upstream { message: String },
}

impl From<RaspError> for AppError {
    fn from(e: RaspError) -> Self {
        if e.is_connectivity() {
            AppError::Offline {
                message: e.to_string(),
            }
        } else {
            AppError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

impl From<Arc<RaspError>> for AppError {
    fn from(e: Arc<RaspError>) -> Self {
        if e.is_connectivity() {
            AppError::Offline {
                message: e.to_string(),
            }
        } else {
            AppError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Offline { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        tracing::warn!(status = %status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
