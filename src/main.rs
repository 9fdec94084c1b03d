//! Gatherer Server: file upload service
//!
//! Main entry point that wires the stores, the coordinator, and the HTTP API
//! together and starts the server.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use gatherer_api::AppState;
use gatherer_core::config::AppConfig;
use gatherer_core::error::AppError;
use gatherer_service::StorageCoordinator;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` files and `GATHERER__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GATHERER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Gatherer v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Content store ────────────────────────────────────
    tracing::info!(backend = ?config.storage.backend, "Initializing content store...");
    let content = gatherer_storage::build_content_store(&config.storage).await?;

    // ── Step 2: Metadata store (connect + migrate) ───────────────
    tracing::info!(backend = ?config.database.backend, "Initializing metadata store...");
    let metadata = gatherer_database::build_metadata_store(&config.database).await?;

    // ── Step 3: Coordinator ──────────────────────────────────────
    let coordinator = Arc::new(StorageCoordinator::new(
        content,
        metadata.store,
        config.storage.max_upload_size_bytes,
    ));
    tracing::info!(
        max_upload_size_bytes = coordinator.max_upload_size(),
        "Storage coordinator ready"
    );

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(Arc::new(config), coordinator);
    let app = gatherer_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Gatherer server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let drained = drain(server, shutdown_rx, grace).await?;

    // ── Step 6: Release resources ────────────────────────────────
    if let Some(pool) = metadata.pool {
        pool.close().await;
    }

    if drained {
        tracing::info!("Gatherer server shut down gracefully");
    } else {
        tracing::warn!("Gatherer server shut down with requests still in flight");
    }
    Ok(())
}

/// Drive `server` to completion, abandoning it `grace` after shutdown
/// begins. Returns whether every in-flight request finished.
async fn drain<F>(
    server: F,
    mut shutdown_rx: watch::Receiver<bool>,
    grace: Duration,
) -> Result<bool, AppError>
where
    F: Future<Output = std::io::Result<()>>,
{
    let deadline = async {
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
            Ok(true)
        }
        _ = deadline => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "In-flight requests did not finish within the grace period; exiting"
            );
            Ok(false)
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
