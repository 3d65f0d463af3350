use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn migrate(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = super::connect(config).await?;
    DatabaseManager::apply_schema(&pool).await?;
    output_success(output_format, "Schema applied", None)
}

pub async fn health(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = super::connect(config).await?;
    DatabaseManager::health_check(&pool).await?;
    output_success(
        output_format,
        "Database reachable",
        Some(json!({ "max_connections": config.database.max_connections })),
    )
}
