pub mod eligibility;
pub mod error;
pub mod guard;
pub mod memory;
pub mod request;
pub mod store;
pub mod workflow;

pub use eligibility::EligibilityChecker;
pub use error::RegistrationError;
pub use guard::{authorize, Decision};
pub use memory::MemoryStore;
pub use request::{RegistrationBody, ValidationError};
pub use store::{
    Catalog, Ledger, Registration, RegistrationKey, StoreError, StudentDirectory, StudentRecord,
    SubjectRecord,
};
pub use workflow::RegistrationWorkflow;
