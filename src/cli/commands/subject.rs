use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::PgCatalog;
use crate::registration::SubjectRecord;
use crate::services::{SubjectCreateBody, SubjectError, SubjectService};
use crate::types::{Caller, CourseId};

/// Identity recorded in `updated_by` for CLI writes
const CLI_CALLER: &str = "cli";

#[derive(Subcommand)]
pub enum SubjectCommands {
    #[command(about = "Create a subject")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, help = "K01, K02 or OTHER")]
        course: CourseId,
        #[arg(long, help = "Seat capacity")]
        capacity: i32,
        #[arg(long, default_value_t = 3)]
        credits: i32,
        #[arg(long, default_value_t = 0)]
        tuition: i64,
        #[arg(long, help = "Create the subject closed for registration")]
        closed: bool,
    },

    #[command(about = "Open a subject for registration")]
    Open {
        #[arg(long)]
        id: i64,
    },

    #[command(about = "Close a subject for new registrations")]
    Close {
        #[arg(long)]
        id: i64,
    },

    #[command(about = "Soft-delete a subject")]
    Delete {
        #[arg(long)]
        id: i64,
    },
}

pub async fn handle(
    cmd: SubjectCommands,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = PgCatalog::new(super::connect(config).await?);
    let service = SubjectService::new(Arc::new(catalog), config.registration.clone());
    let caller = Caller::admin(CLI_CALLER);

    match cmd {
        SubjectCommands::Add {
            name,
            course,
            capacity,
            credits,
            tuition,
            closed,
        } => {
            let body = SubjectCreateBody {
                subject_name: name,
                course_id: course,
                number_of_student: capacity,
                number_of_credit: credits,
                tuition,
                description: None,
                start_date: None,
                end_date: None,
            };
            let subject = add_subject(&service, &caller, body, closed).await?;

            output_success(
                output_format,
                &format!("Created subject {} in {}", subject.subject_id, subject.course_id),
                Some(json!({ "subject": subject })),
            )
        }
        SubjectCommands::Open { id } => set_status(&service, &caller, id, true, output_format).await,
        SubjectCommands::Close { id } => set_status(&service, &caller, id, false, output_format).await,
        SubjectCommands::Delete { id } => {
            let subject = service.soft_delete_subject(&caller, id).await?;

            output_success(
                output_format,
                &format!("Deleted subject {}", subject.subject_id),
                Some(json!({ "subject": subject })),
            )
        }
    }
}

async fn set_status(
    service: &SubjectService,
    caller: &Caller,
    subject_id: i64,
    open: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let subject = service.set_registration_status(caller, subject_id, open).await?;
    let state = if open { "open" } else { "closed" };

    output_success(
        output_format,
        &format!("Subject {} is now {}", subject.subject_id, state),
        Some(json!({ "subject": subject })),
    )
}

/// Create through the service so the CLI shares validation and audit fields with the API
async fn add_subject(
    service: &SubjectService,
    caller: &Caller,
    body: SubjectCreateBody,
    closed: bool,
) -> Result<SubjectRecord, SubjectError> {
    let subject = service.create_subject(caller, body).await?;
    if closed {
        return service
            .set_registration_status(caller, subject.subject_id, false)
            .await;
    }
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{MemoryStore, ValidationError};

    fn body(name: &str) -> SubjectCreateBody {
        SubjectCreateBody {
            subject_name: name.to_string(),
            course_id: CourseId::K02,
            number_of_student: 30,
            number_of_credit: 3,
            tuition: 0,
            description: None,
            start_date: None,
            end_date: None,
        }
    }

    fn service() -> SubjectService {
        SubjectService::new(Arc::new(MemoryStore::new()), AppConfig::development().registration)
    }

    #[tokio::test]
    async fn add_applies_service_rules() {
        let svc = service();
        let caller = Caller::admin(CLI_CALLER);

        let open = add_subject(&svc, &caller, body("  Databases "), false).await.unwrap();
        assert_eq!(open.subject_name, "Databases");
        assert!(open.is_open_for_registration);
        assert_eq!(open.updated_by.as_deref(), Some(CLI_CALLER));

        let closed = add_subject(&svc, &caller, body("Networks"), true).await.unwrap();
        assert!(!closed.is_open_for_registration);

        let too_long = add_subject(&svc, &caller, body(&"x".repeat(101)), false).await;
        assert!(matches!(
            too_long,
            Err(SubjectError::Validation(ValidationError::SubjectNameTooLong(100)))
        ));
    }
}
