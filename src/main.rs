// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::future::IntoFuture;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::broadcaster::{BroadcastTimer, StatsBroadcaster};
use crate::application::stats_service::StatsService;
use crate::infrastructure::config::load_dashboard_config;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("magnogen_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create services (application layer)
    let stats_service = StatsService::from_settings(&config.telemetry);
    let broadcaster = StatsBroadcaster::new(config.telemetry.channel_capacity);
    let timer = BroadcastTimer::spawn(stats_service.clone(), broadcaster.clone());

    // Create application state
    let state = Arc::new(AppState {
        stats_service,
        broadcaster,
    });

    // Build router (presentation layer)
    let router = build_router(state, &config.server.static_dir);

    // Start server
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting magnogen-dashboard on http://{}", listener.local_addr()?);

    // Push subscribers never finish on their own, so shutdown does not wait for them
    tokio::select! {
        result = axum::serve(listener, router).into_future() => result?,
        _ = shutdown_signal() => {}
    }

    timer.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
