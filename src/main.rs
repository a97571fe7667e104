// src/main.rs

use anyhow::{Context, Result};
use eth_gateway::{
    api::create_router, blockchain::EvmClient, config::Config, AppState,
};
use ethers::providers::Middleware;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eth_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let evm_client = EvmClient::new(&config).context("Failed to initialize EVM client")?;

    // The node may come up after us, so an unanswered startup check is not fatal.
    match evm_client.call(evm_client.provider().get_chainid()).await {
        Ok(chain_id) => info!("Connected to {} (chain id {})", config.eth_rpc_url, chain_id),
        Err(e) => warn!("Node at {} is not answering yet: {}", config.eth_rpc_url, e),
    }

    let addr = config.bind_addr();
    let app = create_router(AppState { config, evm_client });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
