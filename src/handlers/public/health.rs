use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::database::DatabaseManager;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET /health - liveness plus a database ping when running on Postgres
pub async fn health_get(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    let Some(pool) = state.pool.as_ref() else {
        return ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "memory"
        }))
        .into_response();
    };

    match DatabaseManager::health_check(pool).await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "code": "SERVICE_UNAVAILABLE",
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
                .into_response()
        }
    }
}
