//! Session-scoped narrowing of the student collection.

use super::session::{Scope, Session};
use crate::store::StudentRecord;

/// Narrows `all` to the subset visible to `session`, preserving store
/// order. Pure - every endpoint that returns or aggregates student data
/// goes through here so admin scoping cannot be bypassed.
///
/// Department matching is byte-exact against the canonical course label.
/// A student whose record was deleted after login gets an empty result,
/// not an error.
pub fn visible_records(session: &Session, all: Vec<StudentRecord>) -> Vec<StudentRecord> {
    match &session.scope {
        Scope::All => all,
        Scope::Department(dept) => {
            let label = dept.label();
            all.into_iter().filter(|r| r.course == label).collect()
        }
        Scope::SelfRecord(id) => all.into_iter().filter(|r| r.id == *id).collect(),
    }
}
