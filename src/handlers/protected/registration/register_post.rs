use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::handlers::protected::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::RegistrationBody;
use crate::state::AppState;
use crate::types::Caller;

/// POST /subjects/register - register a student into a subject
///
/// Body: `{"subjectID": 1, "studentID": 2}`. Responds with `data: true` once
/// the registration row is committed.
pub async fn register_post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<RegistrationBody>, JsonRejection>,
) -> ApiResult<bool> {
    let key = json_body(payload)?.validate()?;
    let created = state.workflow.create_registration_subject(&caller, key).await?;
    Ok(ApiResponse::success(created))
}
