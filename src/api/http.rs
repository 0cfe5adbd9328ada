//! HTTP server setup with Axum

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use super::rest::devices;
use super::sse::handler::events_handler;
use super::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins; the bridge has no auth
    // surface of its own
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(health_check))
        // Device proxy endpoints
        .route("/govee/discover", post(devices::discover))
        .route("/govee/devices", get(devices::list))
        .route("/govee/devices/:device_id/:action", post(devices::control))
        // SSE push channel
        .route("/events", get(events_handler))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// Health payload for uptime checks
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Govee Bridge API",
        "version": env!("CARGO_PKG_VERSION"),
        "platform": format!("rust/{}-{}", std::env::consts::OS, std::env::consts::ARCH),
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
