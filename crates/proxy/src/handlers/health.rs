//! Liveness endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /health`.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
