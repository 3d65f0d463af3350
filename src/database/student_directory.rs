use async_trait::async_trait;
use sqlx::PgPool;

use super::models::StudentRow;
use crate::registration::{StoreError, StudentDirectory, StudentRecord};

const SELECT_STUDENT: &str = "SELECT student_id, full_name, email, created_at, updated_at, \
     updated_by, is_deleted FROM students";

/// Student lookups backed by the `students` table
#[derive(Clone)]
pub struct PgStudentDirectory {
    pool: PgPool,
}

impl PgStudentDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a student row. Used by the admin CLI to seed accounts.
    pub async fn insert(
        &self,
        email: &str,
        full_name: &str,
        updated_by: &str,
    ) -> Result<StudentRecord, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "INSERT INTO students (email, full_name, updated_by) VALUES ($1, $2, $3) \
             RETURNING student_id, full_name, email, created_at, updated_at, updated_by, is_deleted",
        )
        .bind(email)
        .bind(full_name)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}

#[async_trait]
impl StudentDirectory for PgStudentDirectory {
    async fn find_student_by_id(&self, student_id: i64) -> Result<Option<StudentRecord>, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!("{} WHERE student_id = $1", SELECT_STUDENT))
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }
}
