use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::handlers::protected::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::registration::RegistrationBody;
use crate::state::AppState;
use crate::types::Caller;

/// DELETE /subjects/register - withdraw a registration
///
/// `data` is `false` when there was nothing to remove.
pub async fn register_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<RegistrationBody>, JsonRejection>,
) -> ApiResult<bool> {
    let key = json_body(payload)?.validate()?;
    let removed = state.workflow.delete_registration_subject(&caller, key).await?;
    Ok(ApiResponse::success(removed))
}
