// handlers/public/system.rs - GET / and GET /health
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "DevConnector API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "users": "/users/current",
            "profile": "/profile",
            "posts": "/posts"
        }
    }))
}

/// GET /health - reports whether the store answers
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now();
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": timestamp, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": timestamp, "database": e.to_string() })),
            )
        }
    }
}
