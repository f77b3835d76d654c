//! Price feed adapters for the lending venue.
//!
//! The oracle loop consumes the [`PriceFeed`] contract; everything else here
//! is an implementation of it:
//!
//! - [`ChainlinkFeed`]: Chainlink aggregator read over HTTP RPC (primary)
//! - [`SpotFeed`]: public spot-price HTTP API (secondary)
//! - [`FallbackFeed`]: primary → secondary composition with a last-known
//!   price cache

mod chainlink;
mod fallback;
mod spot;

pub use chainlink::ChainlinkFeed;
pub use fallback::FallbackFeed;
pub use spot::SpotFeed;

use async_trait::async_trait;
use thiserror::Error;

/// Feed failure taxonomy.
///
/// `Unavailable` is transient: the oracle loop logs it and skips the tick.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport, RPC, or upstream failure.
    #[error("price feed unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),

    /// The feed answered, but with a price that fails sanity checks.
    #[error("invalid feed answer: {0}")]
    InvalidAnswer(String),
}

/// Contract between the oracle loop and a price source.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Latest reference price for the given asset symbol, in USD.
    async fn fetch_latest_price(&self, symbol: &str) -> Result<f64, FeedError>;
}
