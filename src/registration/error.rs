use thiserror::Error;

use super::store::StoreError;

/// Terminal outcomes of a registration request.
///
/// Each domain kind carries a stable machine-readable code; `Storage` wraps
/// infrastructure failures and is never shown to clients verbatim.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Student ID is invalid or does not identify any object")]
    StudentIdInvalid,

    #[error("You do not have permission")]
    Unauthorized,

    #[error("Subject ID is invalid or does not identify any object")]
    SubjectIdInvalid,

    #[error("The course is closed for student registration")]
    CourseClosedForRegistration,

    #[error("Exceeds the maximum number of subjects allowed per course or the subject has no seats left")]
    ExceedsMaximumSubjects,

    #[error("Student has already registered for this subject")]
    StudentAlreadyRegistered,

    #[error(transparent)]
    Storage(StoreError),
}

impl RegistrationError {
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::StudentIdInvalid => "REG_STU_ID_INVALID",
            RegistrationError::Unauthorized => "UNAUTHORIZED",
            RegistrationError::SubjectIdInvalid => "REG_SUB_ID_INVALID",
            RegistrationError::CourseClosedForRegistration => "REG_COURSE_CLOSED",
            RegistrationError::ExceedsMaximumSubjects => "REG_EXCEEDS_MAX_SUBJECTS",
            RegistrationError::StudentAlreadyRegistered => "STUDENT_ALREADY_REGISTERED",
            RegistrationError::Storage(_) => "UNCATEGORIZED_EXCEPTION",
        }
    }
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => RegistrationError::StudentAlreadyRegistered,
            other => RegistrationError::Storage(other),
        }
    }
}
