//! Liveness and build identification

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": "dnr-relay",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /build_info
pub async fn build_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("GIT_HASH"),
        "build_timestamp": env!("BUILD_TIMESTAMP"),
        "build_profile": env!("BUILD_PROFILE"),
        "uptime_seconds": (chrono::Utc::now() - state.startup_time).num_seconds(),
    }))
}
