pub mod student;
pub mod subject;

pub use student::StudentRow;
pub use subject::SubjectRow;
