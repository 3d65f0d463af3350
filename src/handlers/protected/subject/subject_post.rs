use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::handlers::protected::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::SubjectRecord;
use crate::services::SubjectCreateBody;
use crate::state::AppState;
use crate::types::Caller;

/// POST /subjects - admin only; new subjects start open for registration
pub async fn subject_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<SubjectCreateBody>, JsonRejection>,
) -> ApiResult<SubjectRecord> {
    let body = json_body(payload)?;
    let subject = state.subjects.create_subject(&caller, body).await?;
    Ok(ApiResponse::created(subject))
}
