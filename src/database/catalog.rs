use async_trait::async_trait;
use sqlx::PgPool;

use super::models::SubjectRow;
use crate::registration::{Catalog, StoreError, SubjectRecord};

const SUBJECT_COLUMNS: &str = "s.subject_id, s.subject_name, s.course_id, s.number_of_student, \
     s.number_of_credit, s.tuition, s.description, s.start_date, s.end_date, s.status, \
     s.created_at, s.updated_at, s.updated_by, s.is_deleted";

/// Subject catalog backed by the `subjects` table
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, subject: &SubjectRecord) -> Result<SubjectRow, sqlx::Error> {
        sqlx::query_as::<_, SubjectRow>(&format!(
            "INSERT INTO subjects AS s (subject_name, course_id, number_of_student, number_of_credit, \
             tuition, description, start_date, end_date, status, updated_by, is_deleted) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            SUBJECT_COLUMNS
        ))
        .bind(&subject.subject_name)
        .bind(subject.course_id.as_str())
        .bind(subject.number_of_student_capacity)
        .bind(subject.number_of_credit)
        .bind(subject.tuition)
        .bind(&subject.description)
        .bind(subject.start_date)
        .bind(subject.end_date)
        .bind(subject.is_open_for_registration)
        .bind(&subject.updated_by)
        .bind(subject.is_deleted)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(&self, subject: &SubjectRecord) -> Result<Option<SubjectRow>, sqlx::Error> {
        sqlx::query_as::<_, SubjectRow>(&format!(
            "UPDATE subjects AS s SET subject_name = $2, course_id = $3, number_of_student = $4, \
             number_of_credit = $5, tuition = $6, description = $7, start_date = $8, end_date = $9, \
             status = $10, updated_by = $11, is_deleted = $12, updated_at = now() \
             WHERE s.subject_id = $1 RETURNING {}",
            SUBJECT_COLUMNS
        ))
        .bind(subject.subject_id)
        .bind(&subject.subject_name)
        .bind(subject.course_id.as_str())
        .bind(subject.number_of_student_capacity)
        .bind(subject.number_of_credit)
        .bind(subject.tuition)
        .bind(&subject.description)
        .bind(subject.start_date)
        .bind(subject.end_date)
        .bind(subject.is_open_for_registration)
        .bind(&subject.updated_by)
        .bind(subject.is_deleted)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn find_subject(
        &self,
        subject_id: i64,
        include_deleted: bool,
    ) -> Result<Option<SubjectRecord>, StoreError> {
        let mut sql = format!("SELECT {} FROM subjects s WHERE s.subject_id = $1", SUBJECT_COLUMNS);
        if !include_deleted {
            sql.push_str(" AND s.is_deleted = FALSE");
        }

        let row = sqlx::query_as::<_, SubjectRow>(&sql)
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(SubjectRecord::try_from).transpose()
    }

    async fn save(&self, subject: &SubjectRecord) -> Result<SubjectRecord, StoreError> {
        let row = if subject.subject_id == 0 {
            self.insert(subject).await?
        } else {
            self.update(subject).await?.ok_or_else(|| {
                StoreError::Malformed(format!("subject {} does not exist", subject.subject_id))
            })?
        };
        SubjectRecord::try_from(row)
    }

    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<SubjectRecord>, StoreError> {
        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {} FROM subjects s JOIN registrations r ON r.subject_id = s.subject_id \
             WHERE r.student_id = $1 ORDER BY s.subject_id",
            SUBJECT_COLUMNS
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SubjectRecord::try_from).collect()
    }
}
