//! Login, logout, and session verification endpoints.

use axum::{extract::State, http::HeaderMap, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Role, Session};
use crate::error::ApiError;
use crate::middleware::extract_bearer_token;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// POST /api/auth/login - authenticate and receive a bearer token.
///
/// The session fields are flattened into the response next to the token,
/// so admin clients see `adminType`/`department`/`color` and student
/// clients see `studentId`.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let role: Role = payload.role.parse()?;
    let (token, session) = auth::login(
        &state.store,
        &state.sessions,
        &payload.username,
        &payload.password,
        role,
    )
    .await?;

    tracing::info!(role = ?session.role, identity = %session.email, "login succeeded");

    let mut body = match serde_json::to_value(&session) {
        Ok(Value::Object(map)) => map,
        _ => {
            return Err(ApiError::internal_server_error(
                "Failed to serialize session",
            ))
        }
    };
    body.insert("success".to_string(), json!(true));
    body.insert("token".to_string(), json!(token));
    Ok(Json(Value::Object(body)))
}

/// POST /api/auth/logout - drop the presented session, if any.
///
/// Never fails: logging out without a token, or with a token that is
/// already gone, still reports success.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = extract_bearer_token(&headers) {
        state.sessions.delete(&token);
    }
    Json(json!({ "success": true, "message": "Logged out successfully" }))
}

/// GET /api/auth/verify - echo the session resolved by the gate.
pub async fn verify(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({ "success": true, "user": session }))
}
