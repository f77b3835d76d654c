//! Wallet balances and reputation state.

use std::collections::HashMap;

use crate::credit::{self, CreditOutcome, RiskTier};
use crate::error::VenueError;

/// Seed balances restored by `reset`.
const SEED_BALANCES: [(&str, f64); 4] = [
    ("ETH", 10.0),
    ("BTC", 0.5),
    ("SOL", 100.0),
    ("USDC", 10_000.0),
];

/// Initial reputation score.
const SEED_SCORE: i32 = 750;

/// The single user's wallet. Balances, reputation score, and the risk tier
/// the score implies; the tier is recomputed with every score change.
#[derive(Debug, Clone)]
pub struct WalletState {
    balances: HashMap<String, f64>,
    reputation_score: i32,
    risk_tier: RiskTier,
    network: String,
}

impl WalletState {
    pub fn new() -> Self {
        Self {
            balances: SEED_BALANCES
                .iter()
                .map(|(symbol, amount)| (symbol.to_string(), *amount))
                .collect(),
            reputation_score: SEED_SCORE,
            risk_tier: RiskTier::from_score(SEED_SCORE),
            network: "Sepolia".to_string(),
        }
    }

    pub fn balance(&self, asset: &str) -> f64 {
        self.balances.get(asset).copied().unwrap_or(0.0)
    }

    pub fn balances(&self) -> &HashMap<String, f64> {
        &self.balances
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn reputation_score(&self) -> i32 {
        self.reputation_score
    }

    pub fn risk_tier(&self) -> RiskTier {
        self.risk_tier
    }

    /// Remove funds, failing before any mutation if the holding is short.
    pub fn debit(&mut self, asset: &str, amount: f64) -> Result<(), VenueError> {
        let available = self.balance(asset);
        if available < amount {
            return Err(VenueError::InsufficientBalance {
                asset: asset.to_string(),
                requested: amount,
                available,
            });
        }
        *self.balances.entry(asset.to_string()).or_insert(0.0) -= amount;
        Ok(())
    }

    /// Add funds. The amount may be negative: the voluntary-close payout is
    /// deliberately not clamped at zero (see DESIGN.md).
    pub fn credit(&mut self, asset: &str, amount: f64) {
        *self.balances.entry(asset.to_string()).or_insert(0.0) += amount;
    }

    /// Nudge the reputation score and recompute the tier in the same step.
    pub fn record_outcome(&mut self, outcome: CreditOutcome) {
        let (score, tier) = credit::apply_outcome(self.reputation_score, outcome);
        self.reputation_score = score;
        self.risk_tier = tier;
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::new()
    }
}
