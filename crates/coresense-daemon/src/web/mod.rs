//! HTTP API module.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::state::AppState;

/// Creates the web router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Current readings
        .route("/", get(readings))
        // Readings are polled cross-origin by dashboards
        .layer(CorsLayer::permissive())
        // State
        .with_state(state)
}

/// GET / - CPU utilization and core temperatures as one JSON array
///
/// The first element is the CPU percentage truncated to an integer, followed
/// by the temperature readings in label order.
async fn readings(State(state): State<Arc<AppState>>) -> Response {
    match state.sample() {
        Ok((cpu, temperatures)) => {
            let mut values = Vec::with_capacity(temperatures.len() + 1);
            values.push(cpu as i64);
            values.extend(temperatures);
            Json(values).into_response()
        }
        Err(e) => {
            warn!("Sensor read failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "sensor_unavailable" })),
            )
                .into_response()
        }
    }
}
