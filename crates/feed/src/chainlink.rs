//! Chainlink aggregator feed (primary source for the anchor asset).

use alloy::primitives::{address, Address};
use alloy::providers::ProviderBuilder;
use alloy::sol;
use anyhow::anyhow;
use async_trait::async_trait;
use tracing::debug;

use crate::{FeedError, PriceFeed};

// Chainlink AggregatorV3 interface
sol! {
    #[sol(rpc)]
    interface IAggregatorV3 {
        function latestRoundData() external view returns (
            uint80 roundId,
            int256 answer,
            uint256 startedAt,
            uint256 updatedAt,
            uint80 answeredInRound
        );

        function decimals() external view returns (uint8);
    }
}

/// ETH/USD aggregator on Ethereum Sepolia.
const SEPOLIA_ETH_USD: Address = address!("694AA1769357215DE4FAC081bf1f309aDC325306");

/// Chainlink feed serving one symbol from one aggregator.
///
/// Holds the RPC URL rather than a provider so construction is infallible
/// and connections are made per fetch.
#[derive(Debug, Clone)]
pub struct ChainlinkFeed {
    rpc_url: String,
    aggregator: Address,
    symbol: String,
    /// Price decimals (8 for standard Chainlink USD pairs)
    decimals: u8,
}

impl ChainlinkFeed {
    pub fn new(rpc_url: impl Into<String>, aggregator: Address, symbol: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            aggregator,
            symbol: symbol.into(),
            decimals: 8,
        }
    }

    /// The ETH/USD aggregator on Sepolia, the venue's anchor feed.
    pub fn sepolia_eth_usd(rpc_url: impl Into<String>) -> Self {
        Self::new(rpc_url, SEPOLIA_ETH_USD, "ETH")
    }

    async fn latest_answer(&self) -> Result<f64, FeedError> {
        let url = self
            .rpc_url
            .parse()
            .map_err(|e| FeedError::Unavailable(anyhow!("bad RPC URL: {e}")))?;
        let provider = ProviderBuilder::new().on_http(url);
        let contract = IAggregatorV3::new(self.aggregator, &provider);

        let round = contract
            .latestRoundData()
            .call()
            .await
            .map_err(|e| FeedError::Unavailable(anyhow!(e)))?;

        if round.answer.is_negative() || round.answer.is_zero() {
            return Err(FeedError::InvalidAnswer(format!(
                "non-positive answer {} from {}",
                round.answer, self.aggregator
            )));
        }
        if round.updatedAt.is_zero() {
            return Err(FeedError::InvalidAnswer(format!(
                "round {} never updated",
                round.roundId
            )));
        }

        let divisor = 10_f64.powi(self.decimals as i32);
        let price = round.answer.to_string().parse::<f64>().unwrap_or(0.0) / divisor;
        if price <= 0.0 {
            return Err(FeedError::InvalidAnswer(format!(
                "unparseable answer {}",
                round.answer
            )));
        }

        debug!(
            symbol = %self.symbol,
            aggregator = %self.aggregator,
            price,
            "aggregator round fetched"
        );
        Ok(price)
    }
}

#[async_trait]
impl PriceFeed for ChainlinkFeed {
    async fn fetch_latest_price(&self, symbol: &str) -> Result<f64, FeedError> {
        if symbol != self.symbol {
            return Err(FeedError::Unavailable(anyhow!(
                "no aggregator configured for {symbol}"
            )));
        }
        self.latest_answer().await
    }
}
