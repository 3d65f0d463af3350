use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::handlers::protected::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::SubjectRecord;
use crate::services::SubjectStatusBody;
use crate::state::AppState;
use crate::types::Caller;

/// PUT /subjects/:id - admin only; opens or closes registration
pub async fn subject_put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SubjectStatusBody>, JsonRejection>,
) -> ApiResult<SubjectRecord> {
    let subject_id = path_id(path)?;
    let body = json_body(payload)?;
    let subject = state
        .subjects
        .set_registration_status(&caller, subject_id, body.status)
        .await?;
    Ok(ApiResponse::success(subject))
}
