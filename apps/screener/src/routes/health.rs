use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and the artifact set currently loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = state.inference.model();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener",
        "artifact_set": model.artifact_set(),
        "trained_at": model.trained_at(),
    }))
}
