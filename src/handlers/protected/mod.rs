// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here runs behind `jwt_auth_middleware` and receives the
// resolved `Caller` as an extension. The caller is passed explicitly into the
// workflow and services.
pub mod registration;
pub mod student;
pub mod subject;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use crate::error::ApiError;

/// Unwrap a JSON body, mapping extractor rejections to `INVALID_JSON`
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
    }
}

/// Unwrap a numeric path id, mapping extractor rejections to `INVALID_PATH_ID`
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => Err(ApiError::bad_request("INVALID_PATH_ID", rejection.body_text())),
    }
}
