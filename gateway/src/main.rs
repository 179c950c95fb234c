//! Rewards gateway server binary

use rewards_gateway::{app, AppState};
use rewards_ledger::{Config, Ledger};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting DropRewards Gateway");

    // Load configuration: file if given, env overrides otherwise
    let config = match std::env::var("REWARDS_CONFIG") {
        Ok(path) => Config::from_file(path)?,
        Err(_) => Config::from_env()?,
    };
    let bind_addr =
        std::env::var("REWARDS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let ledger = Arc::new(Ledger::new(config)?);
    let state = AppState { ledger };

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Gateway listening on: {}", bind_addr);
    info!("   POST /api/users          - Register user");
    info!("   GET  /api/users/:id/balance - DROP/DRF balances");
    info!("   GET  /api/users/:id/events  - Reward event history");
    info!("   POST /api/receipts/scan  - Credit DROP for a receipt");
    info!("   POST /api/rewards/redeem - Burn DROP for a reward");
    info!("   GET  /api/stats          - Platform statistics");
    info!("   GET  /health             - Health check");
    info!("   GET  /metrics            - Prometheus metrics");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
