//! LendSim — simulated collateralized-lending venue.
//!
//! Runs the position risk engine: a periodic oracle loop pulls the anchor
//! price from a live Chainlink feed (with an HTTP spot fallback), reprices
//! the simulated market, revalues the open position, and triggers
//! liquidation when the health factor crosses 1.0. The HTTP request layer
//! consuming the venue lives outside this binary.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lendsim_core::{init_config, OracleLoop, SimConfig, Venue};
use lendsim_feed::{ChainlinkFeed, FallbackFeed, PriceFeed, SpotFeed};

/// Environment variable names.
mod env {
    pub const SEPOLIA_RPC_URL: &str = "SEPOLIA_RPC_URL";
}

const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

#[tokio::main]
async fn main() -> Result<()> {
    // Print startup banner
    print_banner();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lendsim_core=debug,lendsim_feed=debug")),
        )
        .init();

    // Load and initialize simulation config (SIM_PROFILE selects a profile)
    let sim_config = SimConfig::from_env();
    sim_config.log_config();
    init_config(sim_config);

    info!("Starting LendSim venue");

    let rpc_url =
        std::env::var(env::SEPOLIA_RPC_URL).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
    info!(rpc = %rpc_url, "Anchor feed: Chainlink ETH/USD on Sepolia");

    // Feed stack: Chainlink primary, public spot API secondary
    let feed: Arc<dyn PriceFeed> = Arc::new(FallbackFeed::new(
        Arc::new(ChainlinkFeed::sepolia_eth_usd(rpc_url)),
        Arc::new(SpotFeed::new()),
    ));

    let venue = Arc::new(Venue::new());
    let oracle = OracleLoop::new(venue.clone(), feed);

    // Clean shutdown: stop scheduling ticks on ctrl-c
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let oracle_handle = tokio::spawn(async move { oracle.run(shutdown_rx).await });

    info!("Venue running; ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    shutdown_tx.send(true)?;
    oracle_handle.await?;

    let position = venue.position_snapshot();
    info!(status = ?position.status, realized_pnl = position.realized_pnl, "Final position state");

    Ok(())
}

/// Print startup banner.
fn print_banner() {
    println!(
        r#"
    ╦  ┌─┐┌┐┌┌┬┐╔═╗┬┌┬┐
    ║  ├┤ │││ ││╚═╗││││
    ╩═╝└─┘┘└┘─┴┘╚═╝┴┴ ┴
    Simulated Lending Venue v0.1.0
    "#
    );
}
