//! Records and storage seams consumed by the registration workflow.
//!
//! The workflow only ever talks to these traits. `database` provides the
//! Postgres implementations; `registration::memory` provides an in-process one.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::types::CourseId;

/// Student as seen by the registration core: identity, email, soft-delete flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "studentID")]
    pub student_id: i64,
    pub email: String,
    pub full_name: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    #[serde(rename = "subjectID")]
    pub subject_id: i64,
    pub subject_name: String,
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    /// Fixed seat capacity set at creation
    pub number_of_student_capacity: i32,
    pub number_of_credit: i32,
    pub tuition: i64,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_open_for_registration: bool,
    pub is_deleted: bool,
    pub updated_by: Option<String>,
}

/// Composite natural key of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistrationKey {
    pub subject_id: i64,
    pub student_id: i64,
}

impl RegistrationKey {
    pub fn new(subject_id: i64, student_id: i64) -> Self {
        Self {
            subject_id,
            student_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub key: RegistrationKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("registration already exists: {0:?}")]
    DuplicateKey(RegistrationKey),

    #[error("transaction kept conflicting after {0} attempts")]
    ConflictRetriesExhausted(u32),

    #[error("stored record is malformed: {0}")]
    Malformed(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlx(err))
    }
}

/// Read access to students, owned by the student directory
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Lookup by primary key. Soft-deleted students are still returned.
    async fn find_student_by_id(&self, student_id: i64) -> Result<Option<StudentRecord>, StoreError>;
}

/// Subject catalog. Subjects are soft-deleted, never removed.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn find_subject(
        &self,
        subject_id: i64,
        include_deleted: bool,
    ) -> Result<Option<SubjectRecord>, StoreError>;

    async fn is_open_for_registration(&self, subject_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .find_subject(subject_id, false)
            .await?
            .map(|s| s.is_open_for_registration)
            .unwrap_or(false))
    }

    /// Insert when `subject_id` is 0, otherwise update in place. Returns the stored record.
    async fn save(&self, subject: &SubjectRecord) -> Result<SubjectRecord, StoreError>;

    /// Subjects the student currently holds a registration for
    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<SubjectRecord>, StoreError>;
}

/// Owner of the registration rows and of the two capacity invariants.
///
/// `try_insert` must decide the per-course quota, the per-subject capacity and
/// the insert as one atomic step. `Ok(false)` means a capacity check failed and
/// nothing was written; a racing duplicate surfaces as `StoreError::DuplicateKey`.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn try_insert(
        &self,
        key: RegistrationKey,
        updated_by: &str,
        limit_per_course: i64,
    ) -> Result<bool, StoreError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, key: RegistrationKey) -> Result<bool, StoreError>;
}
