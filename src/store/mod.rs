//! JSON-file-backed student record store.
//!
//! The data file holds `{ "students": [ ... ] }`. Records are loaded once
//! at startup and written through on every mutation; a single process is
//! assumed to own the file.

pub mod student;

pub use student::{StudentPayload, StudentRecord};

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Student not found")]
    NotFound,
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("data file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("data file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct DataFile {
    students: Vec<StudentRecord>,
}

#[derive(Serialize)]
struct DataFileRef<'a> {
    students: &'a [StudentRecord],
}

/// Cheaply cloneable handle to the in-process student collection.
#[derive(Clone)]
pub struct StudentStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    students: RwLock<Vec<StudentRecord>>,
}

impl StudentStore {
    /// Loads the store from `path`. A missing file reads as an empty
    /// collection; a present-but-corrupt file is an error rather than a
    /// silent wipe on the next write.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let students = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<DataFile>(&bytes)?.students,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(count = students.len(), path = %path.display(), "loaded student records");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                students: RwLock::new(students),
            }),
        })
    }

    /// Snapshot of every record, in file order.
    pub async fn list(&self) -> Vec<StudentRecord> {
        self.inner.students.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<StudentRecord> {
        self.inner
            .students
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<StudentRecord> {
        self.inner
            .students
            .read()
            .await
            .iter()
            .find(|s| s.email == email)
            .cloned()
    }

    pub async fn create(&self, payload: StudentPayload) -> Result<StudentRecord, StoreError> {
        let mut students = self.inner.students.write().await;

        if students.iter().any(|s| s.email == payload.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = StudentRecord::new(payload);
        students.push(record.clone());
        self.persist(&students).await?;
        Ok(record)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: StudentPayload,
    ) -> Result<StudentRecord, StoreError> {
        let mut students = self.inner.students.write().await;

        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound)?;
        if students
            .iter()
            .any(|s| s.email == payload.email && s.id != id)
        {
            return Err(StoreError::DuplicateEmail);
        }

        students[index].apply(payload);
        let record = students[index].clone();
        self.persist(&students).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<StudentRecord, StoreError> {
        let mut students = self.inner.students.write().await;

        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound)?;
        let record = students.remove(index);
        self.persist(&students).await?;
        Ok(record)
    }

    async fn persist(&self, students: &[StudentRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&DataFileRef { students })?;
        tokio::fs::write(&self.inner.path, json).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{empty_store, sample_student, store_with};
    use super::*;
    use crate::auth::credentials::Department;

    fn payload(number: &str, department: Department) -> StudentPayload {
        StudentPayload {
            first_name: "Student".to_string(),
            last_name: number.to_string(),
            email: format!("student{number}@gce.edu.in"),
            phone: "9876543210".to_string(),
            gender: None,
            address: None,
            enrollment_date: None,
            course: department.label().to_string(),
            year: 1,
            cgpa: Some(7.5),
            college: None,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let store = empty_store().await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn create_assigns_id_and_persists() {
        let store = empty_store().await;
        let record = store
            .create(payload("101", Department::Civil))
            .await
            .expect("create");

        assert!(!record.id.is_empty());
        assert_eq!(store.get(&record.id).await.map(|r| r.email), Some(record.email.clone()));

        // reload from disk: the write must have gone through
        let reloaded = StudentStore::load(store.inner.path.clone())
            .await
            .expect("reload");
        assert_eq!(reloaded.list().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_on_create() {
        let store = store_with(vec![sample_student("001", Department::Civil)]).await;
        let err = store
            .create(payload("001", Department::Civil))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_checks_email_against_others() {
        let store = store_with(vec![
            sample_student("001", Department::Civil),
            sample_student("002", Department::Civil),
        ])
        .await;

        // updating a record to its own email is fine
        let updated = store
            .update("test-001", payload("001", Department::Mechanical))
            .await
            .expect("update");
        assert_eq!(updated.course, Department::Mechanical.label());

        // but stealing another record's email is not
        let err = store
            .update("test-001", payload("002", Department::Civil))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_is_not_found() {
        let store = empty_store().await;

        let err = store
            .update("missing", payload("001", Department::Civil))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let store = store_with(vec![sample_student("001", Department::Civil)]).await;
        let removed = store.delete("test-001").await.expect("delete");
        assert_eq!(removed.last_name, "001");
        assert!(store.list().await.is_empty());
        assert!(store.get("test-001").await.is_none());
    }

    #[tokio::test]
    async fn find_by_email_is_exact() {
        let store = store_with(vec![sample_student("001", Department::Civil)]).await;
        assert!(store.find_by_email("student001@gce.edu.in").await.is_some());
        assert!(store.find_by_email("STUDENT001@gce.edu.in").await.is_none());
    }
}
