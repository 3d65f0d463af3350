pub mod db;
pub mod student;
pub mod subject;
pub mod token;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Pool for commands that write to Postgres directly
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    Ok(DatabaseManager::connect(&config.database).await?)
}
