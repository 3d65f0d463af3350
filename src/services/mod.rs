pub mod subject_service;

pub use subject_service::{SubjectCreateBody, SubjectError, SubjectService, SubjectStatusBody};
