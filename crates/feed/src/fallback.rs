//! Primary → secondary feed composition with a last-known price cache.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::warn;

use async_trait::async_trait;

use crate::{FeedError, PriceFeed};

/// Two-tier feed: try the primary, fall back to the secondary on any error.
/// Successful fetches update a per-symbol last-known price cache so stale
/// reads stay available to observers while the upstream degrades.
pub struct FallbackFeed {
    primary: Arc<dyn PriceFeed>,
    secondary: Arc<dyn PriceFeed>,
    last_known: DashMap<String, f64>,
}

impl FallbackFeed {
    pub fn new(primary: Arc<dyn PriceFeed>, secondary: Arc<dyn PriceFeed>) -> Self {
        Self {
            primary,
            secondary,
            last_known: DashMap::new(),
        }
    }

    /// Latest successfully fetched price for a symbol, if any.
    pub fn latest(&self, symbol: &str) -> Option<f64> {
        self.last_known.get(symbol).map(|price| *price)
    }
}

#[async_trait]
impl PriceFeed for FallbackFeed {
    async fn fetch_latest_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let price = match self.primary.fetch_latest_price(symbol).await {
            Ok(price) => price,
            Err(e) => {
                warn!(symbol, error = %e, "primary feed failed, trying secondary");
                self.secondary.fetch_latest_price(symbol).await?
            }
        };

        self.last_known.insert(symbol.to_string(), price);
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FixedFeed(f64);

    #[async_trait]
    impl PriceFeed for FixedFeed {
        async fn fetch_latest_price(&self, _symbol: &str) -> Result<f64, FeedError> {
            Ok(self.0)
        }
    }

    struct DownFeed;

    #[async_trait]
    impl PriceFeed for DownFeed {
        async fn fetch_latest_price(&self, _symbol: &str) -> Result<f64, FeedError> {
            Err(FeedError::Unavailable(anyhow!("connection refused")))
        }
    }

    #[tokio::test]
    async fn test_primary_wins_when_healthy() {
        let feed = FallbackFeed::new(Arc::new(FixedFeed(2000.0)), Arc::new(FixedFeed(1999.0)));
        assert_eq!(feed.fetch_latest_price("ETH").await.unwrap(), 2000.0);
        assert_eq!(feed.latest("ETH"), Some(2000.0));
    }

    #[tokio::test]
    async fn test_falls_back_on_primary_failure() {
        let feed = FallbackFeed::new(Arc::new(DownFeed), Arc::new(FixedFeed(1999.0)));
        assert_eq!(feed.fetch_latest_price("ETH").await.unwrap(), 1999.0);
        assert_eq!(feed.latest("ETH"), Some(1999.0));
    }

    #[tokio::test]
    async fn test_both_down_surfaces_error() {
        let feed = FallbackFeed::new(Arc::new(DownFeed), Arc::new(DownFeed));
        assert!(feed.fetch_latest_price("ETH").await.is_err());
        assert_eq!(feed.latest("ETH"), None);
    }
}
