//! In-memory market state: asset table, bounded price history, outcome log.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::assets::{seed_assets, Asset};
use crate::config::config;

/// Kind of record appended to the outcome log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Closed,
    Liquidated,
    FlashLoan,
}

/// Append-only outcome log entry. Never mutated once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Wall-clock date, `%Y-%m-%d %H:%M:%S`
    pub date: String,
    /// Collateral (or acted-on) asset symbol
    pub collateral: String,
    pub amount: f64,
    pub pnl: f64,
    pub result: OutcomeKind,
}

/// Timestamped per-asset price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Wall-clock time, `%H:%M:%S`
    pub time: String,
    pub assets: HashMap<String, f64>,
}

/// Market state owned by the venue. All mutation happens under the venue
/// lock; the oracle loop is the only periodic writer.
#[derive(Debug, Clone)]
pub struct MarketState {
    assets: HashMap<String, Asset>,
    price_history: VecDeque<PriceSnapshot>,
    position_history: Vec<OutcomeRecord>,
}

impl MarketState {
    /// Fresh market seeded from the static asset table, with a baseline
    /// price history so charts are not empty at startup.
    pub fn new() -> Self {
        let mut market = Self {
            assets: seed_assets(),
            price_history: VecDeque::new(),
            position_history: Vec::new(),
        };
        market.seed_price_history(config().oracle.seed_history_len);
        market
    }

    fn seed_price_history(&mut self, len: usize) {
        for i in 0..len {
            let snapshot = PriceSnapshot {
                time: format!("{}:00", 10 + i),
                assets: self.current_prices(),
            };
            self.price_history.push_back(snapshot);
        }
    }

    pub fn asset(&self, symbol: &str) -> Option<&Asset> {
        self.assets.get(symbol)
    }

    /// Overwrite an asset's price. Unknown symbols are ignored; the seed
    /// table is fixed, so a miss here is a programming error upstream.
    pub fn set_price(&mut self, symbol: &str, price: f64) {
        if let Some(asset) = self.assets.get_mut(symbol) {
            asset.price = price;
        }
    }

    pub fn assets(&self) -> &HashMap<String, Asset> {
        &self.assets
    }

    fn current_prices(&self) -> HashMap<String, f64> {
        self.assets
            .iter()
            .map(|(symbol, asset)| (symbol.clone(), asset.price))
            .collect()
    }

    /// Append a price snapshot, evicting the oldest entry beyond the cap.
    pub fn record_snapshot(&mut self, time: String) {
        self.price_history.push_back(PriceSnapshot {
            time,
            assets: self.current_prices(),
        });
        let cap = config().oracle.price_history_cap;
        while self.price_history.len() > cap {
            self.price_history.pop_front();
        }
    }

    /// Append an outcome record, newest-first.
    pub fn push_outcome(&mut self, record: OutcomeRecord) {
        self.position_history.insert(0, record);
    }

    pub fn price_history(&self) -> &VecDeque<PriceSnapshot> {
        &self.price_history
    }

    pub fn position_history(&self) -> &[OutcomeRecord] {
        &self.position_history
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}
