use std::sync::Arc;

use super::eligibility::EligibilityChecker;
use super::error::RegistrationError;
use super::store::{Catalog, Ledger, RegistrationKey, StoreError, StudentDirectory};
use crate::types::Caller;

/// Orchestrates eligibility, authorization and the ledger for one request.
///
/// Create: RECEIVED -> ELIGIBILITY_CHECKED -> AUTHORIZED -> CAPACITY_GRANTED -> COMMITTED,
/// with a terminal error at any gate. Nothing is retried here; a capacity
/// rejection is the final answer for this attempt.
pub struct RegistrationWorkflow {
    checker: EligibilityChecker,
    ledger: Arc<dyn Ledger>,
    subject_limit_for_course: i64,
}

impl RegistrationWorkflow {
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        catalog: Arc<dyn Catalog>,
        ledger: Arc<dyn Ledger>,
        subject_limit_for_course: i64,
    ) -> Self {
        Self {
            checker: EligibilityChecker::new(students, catalog),
            ledger,
            subject_limit_for_course,
        }
    }

    pub fn subject_limit_for_course(&self) -> i64 {
        self.subject_limit_for_course
    }

    pub async fn create_registration_subject(
        &self,
        caller: &Caller,
        key: RegistrationKey,
    ) -> Result<bool, RegistrationError> {
        let (_student, subject) = self.checker.check_create_eligibility(caller, key).await?;

        match self
            .ledger
            .try_insert(key, &caller.email, self.subject_limit_for_course)
            .await
        {
            Ok(true) => {
                tracing::info!(
                    subject_id = key.subject_id,
                    student_id = key.student_id,
                    course_id = %subject.course_id,
                    caller = %caller.email,
                    "registration committed"
                );
                Ok(true)
            }
            Ok(false) => {
                tracing::info!(
                    subject_id = key.subject_id,
                    student_id = key.student_id,
                    limit = self.subject_limit_for_course,
                    "registration rejected: course quota or subject capacity reached"
                );
                Err(RegistrationError::ExceedsMaximumSubjects)
            }
            Err(StoreError::DuplicateKey(_)) => {
                tracing::info!(
                    subject_id = key.subject_id,
                    student_id = key.student_id,
                    "registration rejected: already registered"
                );
                Err(RegistrationError::StudentAlreadyRegistered)
            }
            Err(e) => {
                tracing::error!(
                    subject_id = key.subject_id,
                    student_id = key.student_id,
                    "registration ledger failure: {}",
                    e
                );
                Err(RegistrationError::Storage(e))
            }
        }
    }

    /// Withdraw a registration. Deleting a missing row returns `Ok(false)`.
    pub async fn delete_registration_subject(
        &self,
        caller: &Caller,
        key: RegistrationKey,
    ) -> Result<bool, RegistrationError> {
        self.checker.check_delete_eligibility(caller, key).await?;

        let removed = self.ledger.delete(key).await?;
        tracing::info!(
            subject_id = key.subject_id,
            student_id = key.student_id,
            caller = %caller.email,
            removed,
            "registration withdrawn"
        );
        Ok(removed)
    }
}
