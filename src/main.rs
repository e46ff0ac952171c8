//! Beacon Query - A beacon chain slot query API
//!
//! Answers block reward and sync committee questions about beacon chain
//! slots, with TTL caching and heuristic MEV classification.

mod api;
mod beacon;
mod cache;
mod clock;
mod config;
mod error;
mod models;
mod service;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use beacon::BeaconApiClient;
use cache::CacheStore;
use config::Config;
use service::{ClassifierConfig, ResolverService, SharedCache};
use tasks::{spawn_cleanup_task, ReaperHandle};

/// Main entry point for the Beacon Query server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the beacon node client and cache store
/// 4. Start the background TTL cleanup task
/// 5. Create the Axum router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon_query=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Beacon Query server");

    // Load configuration from environment variables
    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: endpoint={}, port={}, cache_ttl={}s, cache_max_size={}",
        config.beacon_endpoint, config.server_port, config.cache_ttl_secs, config.cache_max_size
    );

    // Beacon node client with per-request timeout
    let chain = Arc::new(BeaconApiClient::new(
        config.beacon_endpoint.clone(),
        config.request_timeout(),
    )?);

    // Shared cache holding both result kinds
    let cache: SharedCache = Arc::new(RwLock::new(CacheStore::new(
        config.cache_max_size,
        config.cache_ttl(),
    )));

    // Start background cleanup task, sweeping at half the TTL
    let reaper = spawn_cleanup_task(cache.clone(), config.cache_ttl() / 2);
    info!("Background cleanup task started");

    // Resolution service and application state
    let service = Arc::new(ResolverService::new(
        chain,
        cache.clone(),
        ClassifierConfig::default(),
    ));
    let state = AppState::new(service, cache);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reaper))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, closes the cache reaper and allows graceful shutdown.
async fn shutdown_signal(reaper: ReaperHandle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Stop the cache reaper
    reaper.close();
    warn!("Cleanup task stopped");
}
