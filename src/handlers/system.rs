// handlers/system.rs - service banner, health probe and unknown-route fallback

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Campus Kart API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - pings the store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "Database unavailable",
                    "error": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

/// Any route nobody claimed
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
