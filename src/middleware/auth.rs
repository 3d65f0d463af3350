use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Caller;

/// JWT authentication middleware that validates tokens and inserts the `Caller`
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers)?;
    let claims = state.keys.validate(token)?;

    let caller = Caller::from(claims);
    tracing::debug!(caller = %caller.email, role = %caller.role, "authenticated request");
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AuthError::MalformedHeader("Empty JWT token")),
        None => Err(AuthError::MalformedHeader(
            "Authorization header must use Bearer token format",
        )),
    }
}
