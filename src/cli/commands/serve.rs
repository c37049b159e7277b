use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::app;
use crate::clock::SystemClock;
use crate::config::AppConfig;
use crate::database::{MemoryStore, PgStore};
use crate::types::AppKind;

pub async fn handle(
    kind: AppKind,
    port: Option<u16>,
    config_path: Option<PathBuf>,
    memory: bool,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path.as_deref())?;
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!("Starting {} in {:?} mode", kind, config.environment);

    let clock = Arc::new(SystemClock);
    let router = if memory {
        if crate::is_production!(config) {
            anyhow::bail!("--memory is not allowed in production");
        }
        tracing::warn!("Serving from memory; nothing is persisted");
        app::router_for(kind, Arc::new(MemoryStore::new()), clock, &config).await?
    } else {
        let store = PgStore::connect(&config.database)
            .await
            .context("database unavailable (set DATABASE_URL or pass --memory)")?;
        app::router_for(kind, Arc::new(store), clock, &config).await?
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("{} listening on http://{}", kind, bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} stopped", kind);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
