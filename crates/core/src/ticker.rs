//! Periodic oracle loop: the sole background mutator of market state.
//!
//! Each tick fetches the anchor price (suspending on network I/O without
//! holding the venue lock), then applies repricing, history, and the
//! liquidation check in one locked step. Fetch failures are logged and the
//! tick is skipped; the loop never terminates the process.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info, warn};

use lendsim_feed::{FeedError, PriceFeed};

use crate::assets::ANCHOR_ASSET;
use crate::config::config;
use crate::venue::Venue;

/// Timer-driven oracle loop.
pub struct OracleLoop {
    venue: Arc<Venue>,
    feed: Arc<dyn PriceFeed>,
    period: Duration,
}

impl OracleLoop {
    pub fn new(venue: Arc<Venue>, feed: Arc<dyn PriceFeed>) -> Self {
        Self {
            venue,
            feed,
            period: config().oracle.tick_interval(),
        }
    }

    /// Run until the shutdown signal flips to `true` (or its sender drops).
    ///
    /// A clean shutdown just stops scheduling further ticks; ticks
    /// themselves are never cancelled mid-mutation.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        info!(period_secs = self.period.as_secs(), "oracle loop started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.tick_once().await {
                        warn!(error = %e, "price fetch failed, skipping tick");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("oracle loop stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One fetch-then-apply cycle. Public so callers (and tests) can drive
    /// ticks without the timer.
    pub async fn tick_once(&self) -> Result<(), FeedError> {
        let price = self.feed.fetch_latest_price(ANCHOR_ASSET).await?;
        debug!(price, "anchor price fetched");
        self.venue.apply_tick(price);
        Ok(())
    }
}
