pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "student-manager")]
#[command(about = "Student Manager CLI - schema, tokens and seed data for the registration API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create or update the database schema")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Health,

    #[command(about = "Mint a bearer token for a caller")]
    Token(commands::token::TokenArgs),

    #[command(about = "Student management")]
    Student {
        #[command(subcommand)]
        cmd: commands::student::StudentCommands,
    },

    #[command(about = "Subject management")]
    Subject {
        #[command(subcommand)]
        cmd: commands::subject::SubjectCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Migrate => commands::db::migrate(config, output_format).await,
        Commands::Health => commands::db::health(config, output_format).await,
        Commands::Token(args) => commands::token::handle(args, config, output_format),
        Commands::Student { cmd } => commands::student::handle(cmd, config, output_format).await,
        Commands::Subject { cmd } => commands::subject::handle(cmd, config, output_format).await,
    }
}
