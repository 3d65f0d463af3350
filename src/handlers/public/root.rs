use axum::extract::State;
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - service info
pub async fn root_get(State(state): State<AppState>) -> ApiResponse<Value> {
    let storage = if state.pool.is_some() { "postgres" } else { "memory" };

    ApiResponse::success(json!({
        "name": "Student Manager API",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": storage,
        "subjectLimitForCourse": state.workflow.subject_limit_for_course(),
        "endpoints": {
            "health": "GET /health (public)",
            "register": "POST /subjects/register (protected)",
            "withdraw": "DELETE /subjects/register (protected)",
            "subject": "GET /subjects/:id (protected)",
            "createSubject": "POST /subjects (protected, admin)",
            "studentSubjects": "GET /students/:id/subjects (protected)"
        }
    }))
}
