//! Health HTTP Routes
//!
//! Liveness endpoints served outside the `/api/v1` envelope.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Shared health state
pub struct HealthState {
    pub service_name: String,
}

/// Health check and root banner routes
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
    };

    (StatusCode::OK, Json(response))
}

async fn root_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(RootResponse {
        message: format!("{} is running", state.service_name),
    })
}
