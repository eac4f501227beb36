//! Health check route
//!
//! # Routes
//!
//! | Path | Method | Purpose | Auth |
//! |------|--------|---------|------|
//! | /health | GET | Liveness, version and uptime | none |
//!
//! # Response example
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (healthy | error)
    status: &'static str,
    /// Crate version
    version: &'static str,
    /// Seconds since startup
    uptime_seconds: u64,
}

/// Basic health check
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}
