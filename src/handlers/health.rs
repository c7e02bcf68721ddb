//! Health check endpoint
//!
//! Provides a simple health check for monitoring and load balancers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Selected generative provider, or "local" when none is configured
    pub provider: &'static str,
}

/// Health check handler
///
/// Returns 200 OK with the selected provider so operators can see at a
/// glance which degradation tier the service is running in.
pub async fn handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let provider = state.provider().selected_provider().unwrap_or("local");

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK",
            provider,
        }),
    )
}
