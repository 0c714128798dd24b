use std::sync::Arc;

use anyhow::Context;
use leettrack_server::api::{AppState, create_app};
use leettrack_server::config::{DEFAULT_CONFIG_PATH, ServerConfig};
use leettrack_server::db::init_pool_and_migrate;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting leettrack server");
    let config_path =
        std::env::var("LEETTRACK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!(path = %config_path, "loading server config");
    let config = ServerConfig::load(&config_path)
        .with_context(|| format!("failed to load server config from {config_path}"))?;

    if config.auth.provision_users {
        info!("unknown users will be provisioned on first sign-in");
    }
    if config.cors.allowed_origins.is_empty() {
        warn!("no CORS origins configured, cross-origin requests will be rejected");
    }

    let db = init_pool_and_migrate(&config.database)
        .await
        .context("failed to initialize database")?;

    let state = Arc::new(AppState::new(db.clone(), &config.auth)?);
    let app = create_app(state, &config.cors).context("failed to build router")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("closing database pool");
    db.close().await.context("failed to close database pool")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
