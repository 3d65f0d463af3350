// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::registration::{RegistrationError, StoreError, ValidationError};

/// HTTP API error: a status class plus the stable code clients switch on
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { code: &'static str, message: String },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthenticated(String),

    // 403 Forbidden
    Forbidden { code: &'static str, message: String },

    // 404 Not Found
    NotFound { code: &'static str, message: String },

    // 406 Not Acceptable (request understood, registration rules refuse it)
    NotAcceptable { code: &'static str, message: String },

    // 409 Conflict
    Conflict { code: &'static str, message: String },

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthenticated(_) => 401,
            ApiError::Forbidden { .. } => 403,
            ApiError::NotFound { .. } => 404,
            ApiError::NotAcceptable { .. } => 406,
            ApiError::Conflict { .. } => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::NotAcceptable { message, .. }
            | ApiError::Conflict { message, .. } => message,
            ApiError::InvalidJson(msg)
            | ApiError::Unauthenticated(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::Forbidden { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::NotAcceptable { code, .. }
            | ApiError::Conflict { code, .. } => code,
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::InternalServerError(_) => "UNCATEGORIZED_EXCEPTION",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.error_code(),
            "message": self.message(),
            "data": Value::Null
        })
    }
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn not_acceptable(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotAcceptable {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        let code = err.code();
        match err {
            RegistrationError::StudentIdInvalid | RegistrationError::SubjectIdInvalid => {
                ApiError::not_found(code, err.to_string())
            }
            RegistrationError::Unauthorized => ApiError::forbidden(code, err.to_string()),
            RegistrationError::CourseClosedForRegistration
            | RegistrationError::ExceedsMaximumSubjects => {
                ApiError::not_acceptable(code, err.to_string())
            }
            RegistrationError::StudentAlreadyRegistered => ApiError::conflict(code, err.to_string()),
            RegistrationError::Storage(store_err) => store_err.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.code(), format!("{}: {}", err.field(), err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => RegistrationError::StudentAlreadyRegistered.into(),
            StoreError::ConflictRetriesExhausted(attempts) => {
                tracing::warn!("Ledger gave up after {} conflicting attempts", attempts);
                ApiError::service_unavailable("Registration is busy, please try again")
            }
            StoreError::Malformed(msg) => {
                tracing::error!("Malformed stored record: {}", msg);
                ApiError::internal_server_error("Uncategorized error")
            }
            StoreError::Database(db_err) => db_err.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        match err {
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => {
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            _ => ApiError::internal_server_error("Uncategorized error"),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidSecret | AuthError::TokenGeneration(_) => {
                tracing::error!("Token handling failed: {}", err);
                ApiError::internal_server_error("Uncategorized error")
            }
            other => ApiError::unauthenticated(other.to_string()),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegistrationKey;

    fn status_and_code(err: impl Into<ApiError>) -> (u16, &'static str) {
        let api: ApiError = err.into();
        (api.status_code(), api.error_code())
    }

    #[test]
    fn registration_errors_map_to_fixed_statuses() {
        assert_eq!(status_and_code(RegistrationError::StudentIdInvalid), (404, "REG_STU_ID_INVALID"));
        assert_eq!(status_and_code(RegistrationError::Unauthorized), (403, "UNAUTHORIZED"));
        assert_eq!(status_and_code(RegistrationError::SubjectIdInvalid), (404, "REG_SUB_ID_INVALID"));
        assert_eq!(
            status_and_code(RegistrationError::CourseClosedForRegistration),
            (406, "REG_COURSE_CLOSED")
        );
        assert_eq!(
            status_and_code(RegistrationError::ExceedsMaximumSubjects),
            (406, "REG_EXCEEDS_MAX_SUBJECTS")
        );
        assert_eq!(
            status_and_code(RegistrationError::StudentAlreadyRegistered),
            (409, "STUDENT_ALREADY_REGISTERED")
        );
    }

    #[test]
    fn storage_errors_stay_generic() {
        let err = RegistrationError::Storage(StoreError::Malformed("course_id 'X'".into()));
        let api: ApiError = err.into();
        assert_eq!(api.status_code(), 500);
        assert_eq!(api.error_code(), "UNCATEGORIZED_EXCEPTION");
        assert!(!api.message().contains("course_id"));

        assert_eq!(
            status_and_code(StoreError::ConflictRetriesExhausted(10)),
            (503, "SERVICE_UNAVAILABLE")
        );
        assert_eq!(
            status_and_code(StoreError::DuplicateKey(RegistrationKey::new(1, 2))),
            (409, "STUDENT_ALREADY_REGISTERED")
        );
    }

    #[test]
    fn validation_and_auth_errors() {
        assert_eq!(status_and_code(ValidationError::SubjectIdNull), (400, "REG_SUB_ID_NULL"));
        assert_eq!(status_and_code(AuthError::MissingToken), (401, "UNAUTHENTICATED"));
    }

    #[test]
    fn validation_message_names_the_field() {
        let api = ApiError::from(ValidationError::SubjectIdNotPositive);
        assert_eq!(api.error_code(), "REG_SUB_ID_NOT_POSITIVE");
        assert!(api.message().starts_with("subjectID: "));

        let api = ApiError::from(ValidationError::EndDateBeforeStartDate);
        assert!(api.message().starts_with("endDate: "));
    }

    #[test]
    fn json_body_has_null_data() {
        let body = ApiError::from(RegistrationError::Unauthorized).to_json();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "You do not have permission");
        assert!(body["data"].is_null());
    }
}
