use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only; the completion service is not probed.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "bisuite-api"
    }))
}
