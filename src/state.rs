use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AuthError, JwtKeys};
use crate::config::AppConfig;
use crate::database::{PgCatalog, PgLedger, PgStudentDirectory};
use crate::registration::{MemoryStore, RegistrationWorkflow};
use crate::services::SubjectService;

/// Shared handler state. Cheap to clone; everything behind it is `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<RegistrationWorkflow>,
    pub subjects: Arc<SubjectService>,
    pub keys: Arc<JwtKeys>,
    /// Present only for the Postgres backend; used by the health check
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: &AppConfig) -> Result<Self, AuthError> {
        let students = Arc::new(PgStudentDirectory::new(pool.clone()));
        let catalog = Arc::new(PgCatalog::new(pool.clone()));
        let ledger = Arc::new(PgLedger::new(
            pool.clone(),
            config.database.serialization_retries,
        ));

        Ok(Self {
            workflow: Arc::new(RegistrationWorkflow::new(
                students,
                catalog.clone(),
                ledger,
                config.registration.subject_limit_for_course,
            )),
            subjects: Arc::new(SubjectService::new(catalog, config.registration.clone())),
            keys: Arc::new(Self::keys(config)?),
            pool: Some(pool),
        })
    }

    pub fn in_memory(store: Arc<MemoryStore>, config: &AppConfig) -> Result<Self, AuthError> {
        Ok(Self {
            workflow: Arc::new(RegistrationWorkflow::new(
                store.clone(),
                store.clone(),
                store.clone(),
                config.registration.subject_limit_for_course,
            )),
            subjects: Arc::new(SubjectService::new(store, config.registration.clone())),
            keys: Arc::new(Self::keys(config)?),
            pool: None,
        })
    }

    fn keys(config: &AppConfig) -> Result<JwtKeys, AuthError> {
        JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
    }
}
