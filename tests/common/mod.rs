#![allow(dead_code)]

use std::sync::{Arc, Once};

use student_manager_api::config::AppConfig;
use student_manager_api::registration::{
    MemoryStore, RegistrationWorkflow, StudentRecord, SubjectRecord,
};
use student_manager_api::types::CourseId;

pub const SUBJECT_LIMIT_FOR_COURSE: i64 = 5;
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static TRACING: Once = Once::new();

/// Route tracing output through the test harness; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.registration.subject_limit_for_course = SUBJECT_LIMIT_FOR_COURSE;
    config.security.jwt_secret = TEST_JWT_SECRET.to_string();
    config.api.enable_request_logging = false;
    config
}

pub fn student(student_id: i64, email: &str) -> StudentRecord {
    StudentRecord {
        student_id,
        email: email.to_string(),
        full_name: format!("Student {}", student_id),
        is_deleted: false,
    }
}

pub fn subject(subject_id: i64, course_id: CourseId, capacity: i32) -> SubjectRecord {
    SubjectRecord {
        subject_id,
        subject_name: format!("Subject {}", subject_id),
        course_id,
        number_of_student_capacity: capacity,
        number_of_credit: 3,
        tuition: 0,
        description: None,
        start_date: None,
        end_date: None,
        is_open_for_registration: true,
        is_deleted: false,
        updated_by: None,
    }
}

/// Email used for every student seeded by `seed_students`
pub fn email_of(student_id: i64) -> String {
    format!("student{}@example.com", student_id)
}

pub async fn seed_students(store: &MemoryStore, ids: impl IntoIterator<Item = i64>) {
    for id in ids {
        store.insert_student(student(id, &email_of(id))).await;
    }
}

pub fn workflow(store: &Arc<MemoryStore>) -> RegistrationWorkflow {
    RegistrationWorkflow::new(
        store.clone(),
        store.clone(),
        store.clone(),
        SUBJECT_LIMIT_FOR_COURSE,
    )
}
