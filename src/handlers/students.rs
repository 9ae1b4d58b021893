//! Student CRUD endpoints.
//!
//! Every handler runs behind the bearer-token gate. Read endpoints narrow
//! the collection through the authorization filter; mutations additionally
//! require an administrator whose scope covers the affected record.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{visible_records, Role, Scope, Session};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{StudentPayload, StudentRecord};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub course: Option<String>,
    pub year: Option<u8>,
}

/// GET /api/students - visible records, optionally narrowed by query.
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<StudentRecord>> {
    let mut students = visible_records(&session, state.store.list().await);

    if let Some(search) = query.search.as_deref() {
        let needle = search.to_lowercase();
        students.retain(|s| {
            s.first_name.to_lowercase().contains(&needle)
                || s.last_name.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
                || s.course.to_lowercase().contains(&needle)
        });
    }
    if let Some(course) = query.course.as_deref() {
        students.retain(|s| s.course == course);
    }
    if let Some(year) = query.year {
        students.retain(|s| s.year == year);
    }

    Json(students)
}

/// GET /api/students/:id - a single record, if visible to the session.
pub async fn get_one(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<StudentRecord>, ApiError> {
    visible_records(&session, state.store.list().await)
        .into_iter()
        .find(|s| s.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Student not found"))
}

/// Mutations require an administrator whose scope covers `course`.
fn require_admin_scope(session: &Session, course: &str) -> Result<(), ApiError> {
    if session.role != Role::Admin {
        return Err(ApiError::forbidden("Administrator access required"));
    }
    match &session.scope {
        Scope::All => Ok(()),
        Scope::Department(dept) if dept.label() == course => Ok(()),
        _ => Err(ApiError::forbidden("Record is outside your department")),
    }
}

/// POST /api/students - create a record.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<StudentPayload>,
) -> Result<(StatusCode, Json<StudentRecord>), ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    require_admin_scope(&session, &payload.course)?;

    let record = state.store.create(payload).await?;
    tracing::info!(id = %record.id, course = %record.course, "student created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/students/:id - replace a record's editable fields.
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<StudentRecord>, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    let existing = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Student not found"))?;
    // both the current course and the requested one must be in scope, so a
    // department admin can neither grab nor give away records
    require_admin_scope(&session, &existing.course)?;
    require_admin_scope(&session, &payload.course)?;

    let record = state.store.update(&id, payload).await?;
    tracing::info!(id = %record.id, "student updated");
    Ok(Json(record))
}

/// DELETE /api/students/:id - remove a record.
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let existing = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Student not found"))?;
    require_admin_scope(&session, &existing.course)?;

    let student = state.store.delete(&id).await?;
    tracing::info!(id = %student.id, "student deleted");
    Ok(Json(json!({
        "message": "Student deleted successfully",
        "student": student,
    })))
}
