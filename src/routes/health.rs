//! Health check endpoints.
//!
//! `/health` is a bare liveness probe for orchestration. `/api/health` is the
//! JSON variant the browser front end polls; it also reports whether label
//! generation is available.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check handler.
///
/// Returns a simple "ok" response to indicate the service is running.
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub message: String,
}

pub async fn api_health(State(state): State<AppState>) -> Json<ApiHealth> {
    let generation = if state.gateway.is_configured() {
        "label generation available"
    } else {
        "label generation unavailable: API key not configured"
    };

    Json(ApiHealth {
        status: "ok",
        message: format!(
            "{} v{} running, {}",
            state.config.ui.site_name, state.config.ui.version, generation
        ),
    })
}
