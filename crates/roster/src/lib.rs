#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use rosterapp::{api::RosterApi, config::RosterConfig, store::fs_backend::FsBackend};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::server::{build_router, emit_messages};

pub mod args;
pub mod server;

/// Installs the global tracing subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Loads the data file into a fresh store. Must complete before the listener accepts requests.
pub fn open_api(config: &RosterConfig) -> Result<Arc<RosterApi<FsBackend>>> {
    let data_file = config.data_file();
    let (api, report) = RosterApi::open(FsBackend::new(data_file.clone()))
        .with_context(|| format!("failed to load users from {}", data_file.display()))?;
    emit_messages(&report.messages);
    info!(
        data_file = %data_file.display(),
        users = api.user_count()?,
        "user store ready"
    );
    Ok(Arc::new(api))
}

pub fn build_app(config: &RosterConfig) -> Result<axum::Router> {
    let api = open_api(config)?;
    Ok(build_router(api))
}

pub async fn serve(config: RosterConfig) -> Result<()> {
    let app = build_app(&config)?;
    let listener = TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(bind_addr = %listener.local_addr()?, "roster listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("roster stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
