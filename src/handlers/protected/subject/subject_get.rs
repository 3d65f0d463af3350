use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::handlers::protected::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::SubjectRecord;
use crate::state::AppState;
use crate::types::Caller;

/// GET /subjects/:id
pub async fn subject_get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<SubjectRecord> {
    let subject_id = path_id(path)?;
    let subject = state.subjects.get_by_subject_id(&caller, subject_id).await?;
    Ok(ApiResponse::success(subject))
}
