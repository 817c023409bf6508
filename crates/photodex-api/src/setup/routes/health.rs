//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// Readiness probe - the database answers within the timeout.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let (status, database) =
        match tokio::time::timeout(TIMEOUT, state.db.image_repository.ping()).await {
            Ok(Ok(())) => (StatusCode::OK, "ready".to_string()),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Database readiness check failed");
                let detail = if state.is_production {
                    "not_ready".to_string()
                } else {
                    format!("not_ready: {}", e)
                };
                (StatusCode::SERVICE_UNAVAILABLE, detail)
            }
            Err(_) => {
                tracing::error!("Database readiness check timed out");
                (StatusCode::SERVICE_UNAVAILABLE, "timeout".to_string())
            }
        };

    let overall = if status == StatusCode::OK {
        "ready"
    } else {
        "not_ready"
    };

    (
        status,
        Json(serde_json::json!({
            "status": overall,
            "database": database,
            "extractor": state.normalizer.extractor_name(),
        })),
    )
}
