//! Authentication, sessions, and department-scoped authorization.

pub mod credentials;
pub mod filter;
pub mod session;

pub use credentials::{find_admin, AdminCredential, AdminScope, Department, ADMIN_CREDENTIALS};
pub use filter::visible_records;
pub use session::{AdminType, Clock, Role, Scope, Session, SessionManager, SystemClock};

use thiserror::Error;

use crate::store::StudentStore;

/// Terminal login failures, surfaced to the client verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid admin credentials")]
    InvalidCredentials,
    #[error("Student not found")]
    StudentNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Invalid role")]
    InvalidRole,
}

/// Validates a username/password/role triple and issues a session.
///
/// Admins are matched against the static credential registry. Students log
/// in with their record's email; the expected password is
/// `student<lastName>`. On success the session is inserted into `sessions`
/// and the fresh token returned alongside it; on failure nothing is
/// stored.
pub async fn login(
    store: &StudentStore,
    sessions: &SessionManager,
    username: &str,
    password: &str,
    role: Role,
) -> Result<(String, Session), AuthError> {
    let session = match role {
        Role::Admin => {
            let admin =
                credentials::find_admin(username, password).ok_or(AuthError::InvalidCredentials)?;
            Session::for_admin(admin)
        }
        Role::Student => {
            let record = store
                .find_by_email(username)
                .await
                .ok_or(AuthError::StudentNotFound)?;
            let expected = format!("student{}", record.last_name);
            if password != expected {
                return Err(AuthError::InvalidPassword);
            }
            Session::for_student(&record)
        }
    };

    let token = sessions.create(session.clone());
    Ok((token, session))
}
