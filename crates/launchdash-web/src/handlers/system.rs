use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "launchdash",
        "records": state.dataset.len(),
        "sites": state.dataset.sites().len(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
