use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token authorization gate.
///
/// Resolves the token against the session store and injects the resolved
/// session into request extensions for downstream handlers. Requests with
/// a missing, unknown, or expired token are rejected before any data is
/// touched.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).ok_or_else(unauthorized)?;
    let session = state.sessions.get(&token).ok_or_else(unauthorized)?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized. Please login.")
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.trim().is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
