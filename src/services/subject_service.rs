use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::config::RegistrationConfig;
use crate::error::ApiError;
use crate::registration::{Catalog, RegistrationError, StoreError, SubjectRecord, ValidationError};
use crate::types::{Caller, CourseId, Role};

pub const SUBJECT_NAME_MAX_CHARS: usize = 100;

/// Body of `POST /subjects`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCreateBody {
    pub subject_name: String,
    #[serde(rename = "courseID")]
    pub course_id: CourseId,
    pub number_of_student: i32,
    pub number_of_credit: i32,
    #[serde(default)]
    pub tuition: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl SubjectCreateBody {
    pub fn validate(&self, limits: &RegistrationConfig) -> Result<(), ValidationError> {
        let name = self.subject_name.trim();
        if name.is_empty() {
            return Err(ValidationError::SubjectNameEmpty);
        }
        if name.chars().count() > SUBJECT_NAME_MAX_CHARS {
            return Err(ValidationError::SubjectNameTooLong(SUBJECT_NAME_MAX_CHARS));
        }
        if self.number_of_student < limits.number_of_student_min
            || self.number_of_student > limits.number_of_student_max
        {
            return Err(ValidationError::NumberOfStudentOutOfRange {
                min: limits.number_of_student_min,
                max: limits.number_of_student_max,
            });
        }
        if self.number_of_credit < 1 {
            return Err(ValidationError::NumberOfCreditNotPositive);
        }
        if self.tuition < 0 {
            return Err(ValidationError::TuitionNegative);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::EndDateBeforeStartDate);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SubjectError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<StoreError> for SubjectError {
    fn from(err: StoreError) -> Self {
        SubjectError::Registration(RegistrationError::Storage(err))
    }
}

impl From<SubjectError> for ApiError {
    fn from(err: SubjectError) -> Self {
        match err {
            SubjectError::Registration(e) => e.into(),
            SubjectError::Validation(e) => e.into(),
        }
    }
}

/// Body of `PUT /subjects/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectStatusBody {
    pub status: bool,
}

/// Subject reads and admin writes on top of the catalog
pub struct SubjectService {
    catalog: Arc<dyn Catalog>,
    limits: RegistrationConfig,
}

impl SubjectService {
    pub fn new(catalog: Arc<dyn Catalog>, limits: RegistrationConfig) -> Self {
        Self { catalog, limits }
    }

    /// Admins also see soft-deleted subjects
    pub async fn get_by_subject_id(
        &self,
        caller: &Caller,
        subject_id: i64,
    ) -> Result<SubjectRecord, SubjectError> {
        let include_deleted = match caller.role {
            Role::Admin => true,
            Role::Student => false,
        };

        self.catalog
            .find_subject(subject_id, include_deleted)
            .await?
            .ok_or(SubjectError::Registration(RegistrationError::SubjectIdInvalid))
    }

    pub async fn create_subject(
        &self,
        caller: &Caller,
        body: SubjectCreateBody,
    ) -> Result<SubjectRecord, SubjectError> {
        if !caller.is_admin() {
            return Err(RegistrationError::Unauthorized.into());
        }
        body.validate(&self.limits)?;

        let record = SubjectRecord {
            subject_id: 0,
            subject_name: body.subject_name.trim().to_string(),
            course_id: body.course_id,
            number_of_student_capacity: body.number_of_student,
            number_of_credit: body.number_of_credit,
            tuition: body.tuition,
            description: body.description,
            start_date: body.start_date,
            end_date: body.end_date,
            is_open_for_registration: true,
            is_deleted: false,
            updated_by: Some(caller.email.clone()),
        };

        let saved = self.catalog.save(&record).await?;
        tracing::info!(
            subject_id = saved.subject_id,
            course_id = %saved.course_id,
            caller = %caller.email,
            "subject created"
        );
        Ok(saved)
    }

    /// Open or close a subject for new registrations. Withdrawals stay allowed.
    pub async fn set_registration_status(
        &self,
        caller: &Caller,
        subject_id: i64,
        open: bool,
    ) -> Result<SubjectRecord, SubjectError> {
        let mut subject = self.writable_subject(caller, subject_id).await?;
        subject.is_open_for_registration = open;
        subject.updated_by = Some(caller.email.clone());

        let saved = self.catalog.save(&subject).await?;
        tracing::info!(subject_id, open, caller = %caller.email, "subject status changed");
        Ok(saved)
    }

    /// Flag the subject deleted. Existing registrations are kept.
    pub async fn soft_delete_subject(
        &self,
        caller: &Caller,
        subject_id: i64,
    ) -> Result<SubjectRecord, SubjectError> {
        let mut subject = self.writable_subject(caller, subject_id).await?;
        subject.is_deleted = true;
        subject.updated_by = Some(caller.email.clone());

        let saved = self.catalog.save(&subject).await?;
        tracing::info!(subject_id, caller = %caller.email, "subject deleted");
        Ok(saved)
    }

    async fn writable_subject(&self, caller: &Caller, subject_id: i64) -> Result<SubjectRecord, SubjectError> {
        if !caller.is_admin() {
            return Err(RegistrationError::Unauthorized.into());
        }
        self.catalog
            .find_subject(subject_id, false)
            .await?
            .ok_or(SubjectError::Registration(RegistrationError::SubjectIdInvalid))
    }

    pub async fn registered_subjects(&self, student_id: i64) -> Result<Vec<SubjectRecord>, SubjectError> {
        Ok(self.catalog.subjects_for_student(student_id).await?)
    }
}
