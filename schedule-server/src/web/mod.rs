//! Web layer for the schedule server.
//!
//! Provides JSON endpoints for the city/station pickers, trip search,
//! and network status.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
