use axum::extract::{rejection::PathRejection, Path, State};

use crate::handlers::protected::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::SubjectRecord;
use crate::state::AppState;

/// GET /students/:id/subjects - subjects the student is registered for
pub async fn student_subjects_get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<SubjectRecord>> {
    let student_id = path_id(path)?;
    let subjects = state.subjects.registered_subjects(student_id).await?;
    Ok(ApiResponse::success(subjects))
}
