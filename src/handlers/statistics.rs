//! Aggregate statistics over the session's visible records.

use std::collections::BTreeMap;

use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

use crate::auth::{visible_records, Session};
use crate::state::AppState;

/// GET /api/statistics
///
/// `averageCGPA` is a 2-decimal string, except for an empty visible set
/// where it is the number 0 - clients already depend on that shape.
pub async fn statistics(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<Value> {
    let students = visible_records(&session, state.store.list().await);

    let total = students.len();
    let average_cgpa = if total > 0 {
        let sum: f64 = students.iter().map(|s| s.cgpa).sum();
        json!(format!("{:.2}", sum / total as f64))
    } else {
        json!(0)
    };

    let mut course_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut year_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for student in &students {
        *course_distribution
            .entry(student.course.clone())
            .or_default() += 1;
        *year_distribution
            .entry(student.year.to_string())
            .or_default() += 1;
    }

    Json(json!({
        "totalStudents": total,
        "averageCGPA": average_cgpa,
        "courseDistribution": course_distribution,
        "yearDistribution": year_distribution,
    }))
}
