//! Auction Sweeper - Auction persistence with automatic expiry
//!
//! Serves the auction API and closes expired auctions in the background.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auction_sweeper::api::{create_router, AppState};
use auction_sweeper::auction::{AuctionStore, InMemoryAuctionStore, SqliteAuctionStore};
use auction_sweeper::{AuctionRepository, Config};

/// Main entry point for the auction server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured auction store
/// 4. Create the repository, which starts the expiry scheduler
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, stop serving, then stop the scheduler
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auction_sweeper=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Auction Sweeper");

    let config = Config::from_env();
    info!(
        "Configuration loaded: auction_interval={:?}, sweep_interval={}s, port={}, database={}",
        config.auction_interval,
        config.sweep_interval,
        config.server_port,
        config.database_url.as_deref().unwrap_or("in-memory")
    );

    let store: Arc<dyn AuctionStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(
            SqliteAuctionStore::connect(url)
                .await
                .context("Failed to open auction database")?,
        ),
        None => Arc::new(InMemoryAuctionStore::new()),
    };

    let repository = Arc::new(AuctionRepository::new(store, config.expiry_settings()));
    info!("Auction repository initialized");

    let app = create_router(AppState::new(repository.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    repository.stop();
    repository.stopped().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
