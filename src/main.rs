//! SalonBook Server: booking availability and conflict engine
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use salon_cache::CacheManager;
use salon_core::config::{AppConfig, StorageBackend};
use salon_core::error::AppError;
use salon_database::memory::{MemoryBookingStore, MemoryCatalogStore};
use salon_database::postgres::{PgBookingStore, PgCatalogStore};
use salon_database::{BookingStore, CatalogStore, DatabasePool};

#[tokio::main]
async fn main() {
    let env = std::env::var("SALON_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
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
    tracing::info!("Starting SalonBook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let (catalog, bookings, database) = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            tracing::info!("Running database migrations...");
            salon_database::migration::run_migrations(pool.pool()).await?;
            tracing::info!("Database migrations complete");
            (
                Arc::new(PgCatalogStore::new(pool.pool().clone())) as Arc<dyn CatalogStore>,
                Arc::new(PgBookingStore::new(pool.pool().clone())) as Arc<dyn BookingStore>,
                Some(pool),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!(
                "Using the in-memory store: data is lost on restart and only one server process may run"
            );
            (
                Arc::new(MemoryCatalogStore::new()) as Arc<dyn CatalogStore>,
                Arc::new(MemoryBookingStore::new()) as Arc<dyn BookingStore>,
                None,
            )
        }
    };

    // ── Step 2: Cache ────────────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 3: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = salon_api::AppState::new(config, catalog, bookings, cache, database.clone());
    let app = salon_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("SalonBook server listening on {addr}");

    serve(listener, app).await?;

    if let Some(pool) = database {
        pool.close().await;
    }
    tracing::info!("SalonBook server shut down gracefully");
    Ok(())
}

/// Serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
async fn serve(listener: tokio::net::TcpListener, app: axum::Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
