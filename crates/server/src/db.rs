use crate::config::DatabaseConfig;
use anyhow::{Context, anyhow};
use leettrack_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Opens the process-wide connection pool and brings the schema up to date.
///
/// The returned connection is cloned into every repository; call
/// `DatabaseConnection::close` on it once the server has stopped.
pub async fn init_pool_and_migrate(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let database_url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("database url is not set"))?;

    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to run database migrations")?;
    info!(max_connections = config.max_connections, "database ready");

    Ok(db)
}
