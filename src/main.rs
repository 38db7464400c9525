//! slot-swapper server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use slot_swapper::api;
use slot_swapper::app_state::AppState;
use slot_swapper::config::{AppConfig, LogFormat};
use slot_swapper::domain::NotificationBus;
use slot_swapper::persistence::PostgresJournal;
use slot_swapper::persistence::journal::{
    RETENTION_INTERVAL, spawn_journal_writer, spawn_retention_task,
};
use slot_swapper::store::SlotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting slot-swapper");

    // Build domain and store
    let store = Arc::new(SlotStore::new(config.store_lock_timeout));
    let notification_bus = NotificationBus::new(config.notification_bus_capacity);

    // Optional notification journal
    let journal = if config.persistence_enabled {
        let journal = PostgresJournal::connect(&config)
            .await
            .context("failed to connect to the notification journal")?;
        journal
            .ensure_schema()
            .await
            .context("failed to prepare the notification journal schema")?;
        spawn_journal_writer(journal.clone(), notification_bus.subscribe());
        spawn_retention_task(
            journal.clone(),
            config.journal_retention_days,
            RETENTION_INTERVAL,
        );
        tracing::info!(
            retention_days = config.journal_retention_days,
            "notification journal enabled"
        );
        Some(journal)
    } else {
        None
    };

    // Build application state and router
    let app_state = AppState::new(store, notification_bus, journal);
    let app = api::build_app(app_state, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
