use std::sync::Arc;

use super::error::RegistrationError;
use super::guard::authorize;
use super::store::{Catalog, RegistrationKey, StudentDirectory, StudentRecord, SubjectRecord};
use crate::types::Caller;

/// Pre-checks run before the ledger is touched.
///
/// These reads are advisory snapshots; the ledger re-verifies capacity
/// atomically. Checks short-circuit in a fixed order so the reported error
/// is deterministic: student, authorization, subject, open flag.
pub struct EligibilityChecker {
    students: Arc<dyn StudentDirectory>,
    catalog: Arc<dyn Catalog>,
}

impl EligibilityChecker {
    pub fn new(students: Arc<dyn StudentDirectory>, catalog: Arc<dyn Catalog>) -> Self {
        Self { students, catalog }
    }

    pub async fn check_create_eligibility(
        &self,
        caller: &Caller,
        key: RegistrationKey,
    ) -> Result<(StudentRecord, SubjectRecord), RegistrationError> {
        let (student, subject) = self.check_common(caller, key).await?;
        if !subject.is_open_for_registration {
            return Err(RegistrationError::CourseClosedForRegistration);
        }
        Ok((student, subject))
    }

    /// Same as create minus the open-for-registration gate, so registrations
    /// on closed subjects can still be withdrawn.
    pub async fn check_delete_eligibility(
        &self,
        caller: &Caller,
        key: RegistrationKey,
    ) -> Result<(StudentRecord, SubjectRecord), RegistrationError> {
        self.check_common(caller, key).await
    }

    async fn check_common(
        &self,
        caller: &Caller,
        key: RegistrationKey,
    ) -> Result<(StudentRecord, SubjectRecord), RegistrationError> {
        let student = self
            .students
            .find_student_by_id(key.student_id)
            .await?
            .ok_or(RegistrationError::StudentIdInvalid)?;

        if !authorize(caller, &student.email).is_allowed() {
            tracing::warn!(
                caller = %caller.email,
                student_id = key.student_id,
                "registration change denied for caller"
            );
            return Err(RegistrationError::Unauthorized);
        }

        let subject = self
            .catalog
            .find_subject(key.subject_id, false)
            .await?
            .ok_or(RegistrationError::SubjectIdInvalid)?;

        Ok((student, subject))
    }
}
