use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::AppState;

pub async fn ping_handler() -> Json<Value> {
    info!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Gompa catalog server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Reports whether the catalog store answers. 503 when it does not.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let status = match state.catalog.probe().await {
        Ok(()) => {
            health_status["checks"]["catalog"] = json!({ "status": "healthy" });
            StatusCode::OK
        }
        Err(err) => {
            warn!(error = %err, "catalog health check failed");
            health_status["checks"]["catalog"] = json!({
                "status": "unhealthy",
                "error": "catalog store unreachable"
            });
            health_status["status"] = json!("unhealthy");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health_status))
}
