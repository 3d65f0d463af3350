use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::PgStudentDirectory;

#[derive(Subcommand)]
pub enum StudentCommands {
    #[command(about = "Create a student")]
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
}

pub async fn handle(
    cmd: StudentCommands,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        StudentCommands::Add { email, name } => {
            let directory = PgStudentDirectory::new(super::connect(config).await?);
            let student = directory.insert(&email, &name, "cli").await?;
            output_success(
                output_format,
                &format!("Created student {} ({})", student.student_id, student.email),
                Some(json!({ "student": student })),
            )
        }
    }
}
