pub mod catalog;
pub mod ledger;
pub mod manager;
pub mod models;
pub mod student_directory;

pub use catalog::PgCatalog;
pub use ledger::PgLedger;
pub use manager::{DatabaseError, DatabaseManager};
pub use student_directory::PgStudentDirectory;
