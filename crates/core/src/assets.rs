//! Asset table for the simulated market.
//!
//! Assets are instantiated once at startup from the static seed table and
//! never destroyed; only their prices move afterwards (oracle loop or
//! scenario overrides).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Symbol of the stable unit loans are denominated in. Its price is pinned
/// at $1 and never touched by the oracle loop.
pub const STABLE_ASSET: &str = "USDC";

/// The asset whose price comes from the real external feed; other non-stable
/// asset prices are derived from it.
pub const ANCHOR_ASSET: &str = "ETH";

/// Static seed definition for one market asset.
#[derive(Debug, Clone, Copy)]
pub struct AssetDef {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub ltv: f64,
    pub liquidation_threshold: f64,
}

/// All assets the venue knows about.
pub const SEED_ASSETS: [AssetDef; 4] = [
    AssetDef {
        symbol: "ETH",
        name: "Ethereum",
        price: 2000.0,
        ltv: 0.80,
        liquidation_threshold: 0.85,
    },
    AssetDef {
        symbol: "BTC",
        name: "Bitcoin",
        price: 60_000.0,
        ltv: 0.75,
        liquidation_threshold: 0.80,
    },
    AssetDef {
        symbol: "SOL",
        name: "Solana",
        price: 100.0,
        ltv: 0.60,
        liquidation_threshold: 0.65,
    },
    AssetDef {
        symbol: "USDC",
        name: "USD Coin",
        price: 1.0,
        ltv: 0.90,
        liquidation_threshold: 0.95,
    },
];

/// Market asset with its lending parameters.
///
/// `liquidation_threshold >= ltv` by convention: the liquidation band sits
/// above the borrow ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub ltv: f64,
    pub liquidation_threshold: f64,
}

impl From<&AssetDef> for Asset {
    fn from(def: &AssetDef) -> Self {
        Self {
            symbol: def.symbol.to_string(),
            name: def.name.to_string(),
            price: def.price,
            ltv: def.ltv,
            liquidation_threshold: def.liquidation_threshold,
        }
    }
}

/// Seed price for a symbol, used by baseline resets.
pub fn seed_price(symbol: &str) -> Option<f64> {
    SEED_ASSETS
        .iter()
        .find(|def| def.symbol == symbol)
        .map(|def| def.price)
}

/// Instantiate the seed table into a symbol-keyed map.
pub fn seed_assets() -> HashMap<String, Asset> {
    SEED_ASSETS
        .iter()
        .map(|def| (def.symbol.to_string(), Asset::from(def)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_table() {
        let assets = seed_assets();
        assert_eq!(assets.len(), 4);

        let eth = &assets[ANCHOR_ASSET];
        assert_eq!(eth.price, 2000.0);
        assert_eq!(eth.ltv, 0.80);
        assert_eq!(eth.liquidation_threshold, 0.85);

        assert_eq!(assets[STABLE_ASSET].price, 1.0);
    }

    #[test]
    fn test_threshold_above_ltv() {
        for def in &SEED_ASSETS {
            assert!(def.liquidation_threshold >= def.ltv, "{}", def.symbol);
        }
    }
}
