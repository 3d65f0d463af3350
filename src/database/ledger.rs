use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::manager::DatabaseManager;
use crate::registration::{Ledger, RegistrationKey, StoreError};

/// Quota check, capacity check and insert in one statement.
///
/// A missing subject makes the capacity comparison NULL, so nothing is inserted.
const GUARDED_INSERT: &str = r#"
INSERT INTO registrations (subject_id, student_id, updated_by)
SELECT $1, $2, $3
WHERE (
        SELECT COUNT(*)
        FROM registrations r
        JOIN subjects s ON s.subject_id = r.subject_id
        WHERE r.student_id = $2
          AND s.course_id = (SELECT course_id FROM subjects WHERE subject_id = $1)
      ) < $4
  AND (
        SELECT COUNT(*) FROM registrations WHERE subject_id = $1
      ) < (
        SELECT number_of_student FROM subjects WHERE subject_id = $1
      )
"#;

/// Registration rows in Postgres.
///
/// Every insert runs in a SERIALIZABLE transaction, so two requests that both
/// read the last free slot cannot both commit. The loser gets SQLSTATE 40001
/// and the whole transaction is replayed against the new state.
#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
    max_attempts: u32,
}

impl PgLedger {
    pub fn new(pool: PgPool, max_attempts: u32) -> Self {
        Self {
            pool,
            max_attempts: max_attempts.max(1),
        }
    }

    async fn insert_once(
        &self,
        key: RegistrationKey,
        updated_by: &str,
        limit_per_course: i64,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(GUARDED_INSERT)
            .bind(key.subject_id)
            .bind(key.student_id)
            .bind(updated_by)
            .bind(limit_per_course)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn try_insert(
        &self,
        key: RegistrationKey,
        updated_by: &str,
        limit_per_course: i64,
    ) -> Result<bool, StoreError> {
        for attempt in 1..=self.max_attempts {
            match self.insert_once(key, updated_by, limit_per_course).await {
                Ok(inserted) => return Ok(inserted),
                Err(e) if DatabaseManager::is_unique_violation(&e) => {
                    return Err(StoreError::DuplicateKey(key));
                }
                Err(e) if DatabaseManager::is_retryable_conflict(&e) => {
                    debug!(
                        subject_id = key.subject_id,
                        student_id = key.student_id,
                        attempt,
                        "serialization conflict, retrying registration insert"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            subject_id = key.subject_id,
            student_id = key.student_id,
            attempts = self.max_attempts,
            "registration insert gave up after repeated conflicts"
        );
        Err(StoreError::ConflictRetriesExhausted(self.max_attempts))
    }

    async fn delete(&self, key: RegistrationKey) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM registrations WHERE subject_id = $1 AND student_id = $2")
            .bind(key.subject_id)
            .bind(key.student_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
