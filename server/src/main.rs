//! CloudEvents Relay - Main Entry Point
//!
//! Accepts binary-mode CloudEvents over HTTP and optionally re-posts them
//! to a downstream endpoint.

use anyhow::Result;
use tracing::info;

use ce_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ce_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        forward_url = config.forward_url.as_deref().unwrap_or("-"),
        forward_extensions = ?config.forward_extensions,
        "Starting CloudEvents relay"
    );

    let http_client = config.http_client()?;
    let state = api::AppState::new(config.clone(), http_client);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
