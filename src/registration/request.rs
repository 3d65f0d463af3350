use serde::Deserialize;
use thiserror::Error;

use super::store::RegistrationKey;

/// JSON body shared by `POST` and `DELETE /subjects/register`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationBody {
    #[serde(rename = "subjectID")]
    pub subject_id: Option<i64>,
    #[serde(rename = "studentID")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Subject ID cannot be null")]
    SubjectIdNull,
    #[error("Subject ID must be a positive number")]
    SubjectIdNotPositive,
    #[error("Student ID cannot be null")]
    StudentIdNull,
    #[error("Student ID must be a positive number")]
    StudentIdNotPositive,
    #[error("Subject name cannot be empty")]
    SubjectNameEmpty,
    #[error("Subject name must be less than or equal to {0} characters")]
    SubjectNameTooLong(usize),
    #[error("Number of students must be between {min} and {max}")]
    NumberOfStudentOutOfRange { min: i32, max: i32 },
    #[error("Number of credits must be a positive integer")]
    NumberOfCreditNotPositive,
    #[error("Tuition must not be negative")]
    TuitionNegative,
    #[error("End date must be after the start date")]
    EndDateBeforeStartDate,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::SubjectIdNull => "REG_SUB_ID_NULL",
            ValidationError::SubjectIdNotPositive => "REG_SUB_ID_NOT_POSITIVE",
            ValidationError::StudentIdNull => "REG_STU_ID_NULL",
            ValidationError::StudentIdNotPositive => "REG_STU_ID_NOT_POSITIVE",
            ValidationError::SubjectNameEmpty => "SUB_NAME_IS_EMPTY",
            ValidationError::SubjectNameTooLong(_) => "SUB_NAME_TOO_LONG",
            ValidationError::NumberOfStudentOutOfRange { .. } => "SUB_NUMBER_OF_STUDENT_OUT_OF_RANGE",
            ValidationError::NumberOfCreditNotPositive => "SUB_NUMBER_OF_CREDIT_POSITIVE_INT",
            ValidationError::TuitionNegative => "SUB_TUITION_NEGATIVE",
            ValidationError::EndDateBeforeStartDate => "END_DATE_BEFORE_START_DATE",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::SubjectIdNull | ValidationError::SubjectIdNotPositive => "subjectID",
            ValidationError::StudentIdNull | ValidationError::StudentIdNotPositive => "studentID",
            ValidationError::SubjectNameEmpty | ValidationError::SubjectNameTooLong(_) => "subjectName",
            ValidationError::NumberOfStudentOutOfRange { .. } => "numberOfStudent",
            ValidationError::NumberOfCreditNotPositive => "numberOfCredit",
            ValidationError::TuitionNegative => "tuition",
            ValidationError::EndDateBeforeStartDate => "endDate",
        }
    }
}

impl RegistrationBody {
    /// Subject fields are checked before student fields.
    pub fn validate(&self) -> Result<RegistrationKey, ValidationError> {
        let subject_id = match self.subject_id {
            None => return Err(ValidationError::SubjectIdNull),
            Some(id) if id < 1 => return Err(ValidationError::SubjectIdNotPositive),
            Some(id) => id,
        };
        let student_id = match self.student_id {
            None => return Err(ValidationError::StudentIdNull),
            Some(id) if id < 1 => return Err(ValidationError::StudentIdNotPositive),
            Some(id) => id,
        };
        Ok(RegistrationKey::new(subject_id, student_id))
    }
}
