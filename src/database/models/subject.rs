use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::registration::{StoreError, SubjectRecord};
use crate::types::CourseId;

/// `subjects` row. `status` is the open-for-registration flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubjectRow {
    pub subject_id: i64,
    pub subject_name: String,
    pub course_id: String,
    pub number_of_student: i32,
    pub number_of_credit: i32,
    pub tuition: i64,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
}

impl TryFrom<SubjectRow> for SubjectRecord {
    type Error = StoreError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        let course_id: CourseId = row.course_id.parse().map_err(|e: String| {
            StoreError::Malformed(format!("subject {}: {}", row.subject_id, e))
        })?;

        Ok(SubjectRecord {
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            course_id,
            number_of_student_capacity: row.number_of_student,
            number_of_credit: row.number_of_credit,
            tuition: row.tuition,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            is_open_for_registration: row.status,
            is_deleted: row.is_deleted,
            updated_by: row.updated_by,
        })
    }
}
