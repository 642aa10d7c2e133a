//! Server initialization and runtime setup.
//!
//! Selects the storage backend, spawns the click worker, and runs the Axum
//! server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, StatsService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::connect_store;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initialization order:
///
/// 1. Storage backend probe and selection (the one-shot availability /
///    durability decision)
/// 2. Background click worker over a bounded channel
/// 3. Axum server with client address info for click attribution
///
/// # Errors
///
/// Returns an error if the bind address is invalid or the server fails at
/// runtime. An unreachable database is not an error here: the service starts
/// on the in-memory store instead.
pub async fn run(config: Config) -> Result<()> {
    let (store, backend) = connect_store(&config).await;
    tracing::info!("Storage backend: {}", backend.as_str());

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(
        click_rx,
        store.clone(),
        Duration::from_secs(config.click_timeout_seconds),
    ));
    tracing::info!("Click worker started");

    let links = Arc::new(LinkService::new(store.clone(), config.slug_length));
    let stats = Arc::new(StatsService::new(store));

    let state = AppState {
        links,
        stats,
        click_tx,
        backend,
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
