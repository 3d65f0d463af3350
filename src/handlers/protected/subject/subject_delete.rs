use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::handlers::protected::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Caller;

/// DELETE /subjects/:id - admin only soft delete
pub async fn subject_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<bool> {
    let subject_id = path_id(path)?;
    state.subjects.soft_delete_subject(&caller, subject_id).await?;
    Ok(ApiResponse::success(true))
}
