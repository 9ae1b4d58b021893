//! Token-keyed session records and their in-process store.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use super::credentials::{AdminCredential, AdminScope, Department};
use super::AuthError;
use crate::store::StudentRecord;

/// Session tokens are 32 alphanumeric characters (~190 bits of entropy).
pub const TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            _ => Err(AuthError::InvalidRole),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminType {
    Main,
    Department,
}

/// The subset of student records a session is permitted to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every record (main administrator).
    All,
    /// Records whose course matches the department label.
    Department(Department),
    /// Exactly the student's own record.
    SelfRecord(String),
}

/// Server-side record binding a token to an authenticated identity and its
/// data-visibility scope.
///
/// Constructed only through [`Session::for_admin`] and
/// [`Session::for_student`], which keep the scope consistent with the role:
/// a student session always carries the id of the record it was created
/// from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    #[serde(skip)]
    pub scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_type: Option<AdminType>,
    /// Display name: the admin's registry name or the student's full name.
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl Session {
    pub fn for_admin(admin: &AdminCredential) -> Self {
        let (admin_type, scope) = match admin.scope {
            AdminScope::Main => (AdminType::Main, Scope::All),
            AdminScope::Department(dept) => (AdminType::Department, Scope::Department(dept)),
        };
        Session {
            role: Role::Admin,
            scope,
            admin_type: Some(admin_type),
            username: admin.display_name.to_string(),
            email: format!("{}@gce.edu.in", admin.username),
            department: Some(admin.department_label().to_string()),
            color: Some(admin.color.to_string()),
            student_id: None,
        }
    }

    pub fn for_student(record: &StudentRecord) -> Self {
        Session {
            role: Role::Student,
            scope: Scope::SelfRecord(record.id.clone()),
            admin_type: None,
            username: format!("{} {}", record.first_name, record.last_name),
            email: record.email.clone(),
            department: None,
            color: None,
            student_id: Some(record.id.clone()),
        }
    }
}

/// Time source injected into the [`SessionManager`] so expiry is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    session: Session,
    expires_at: DateTime<Utc>,
}

/// Process-wide session store.
///
/// Cheaply cloneable handle; constructed once at startup and passed to
/// request handlers through application state. Sessions live until logout,
/// expiry, or process restart - they are never persisted.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions: RwLock::new(HashMap::new()),
                clock,
                ttl,
            }),
        }
    }

    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(Arc::new(SystemClock), ttl)
    }

    /// Issues a fresh token for `session` and stores it.
    ///
    /// A generated token that is already present (live or expired but not
    /// yet swept) is discarded and regenerated, so a stored token is never
    /// overwritten.
    pub fn create(&self, session: Session) -> String {
        let expires_at = self.inner.clock.now() + self.inner.ttl;
        let mut sessions = self.inner.sessions.write();

        let mut token = generate_token(TOKEN_LENGTH);
        while sessions.contains_key(&token) {
            token = generate_token(TOKEN_LENGTH);
        }
        sessions.insert(
            token.clone(),
            SessionEntry {
                session,
                expires_at,
            },
        );
        token
    }

    /// Looks up a token. Expired entries are treated as absent.
    pub fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.inner.sessions.read();
        let entry = sessions.get(token)?;
        if entry.expires_at <= self.inner.clock.now() {
            return None;
        }
        Some(entry.session.clone())
    }

    /// Removes the session if present. Logout is idempotent: deleting an
    /// unknown token is a no-op.
    pub fn delete(&self, token: &str) {
        self.inner.sessions.write().remove(token);
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = self.inner.clock.now();
        let mut sessions = self.inner.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    /// Number of stored sessions, including expired but unswept entries.
    pub fn len(&self) -> usize {
        self.inner.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}
