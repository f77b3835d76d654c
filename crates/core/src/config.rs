//! Simulation configuration with profile support.
//!
//! All tunables for the oracle loop, the crude market simulation, and the
//! probabilistic operations live here. Profiles are selected via the
//! `SIM_PROFILE` environment variable and the resolved config is held in a
//! process-wide `OnceLock`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure containing all simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Profile name (for logging/identification)
    #[serde(default = "default_profile_name")]
    pub profile: String,

    /// Oracle loop timing and history bounds
    #[serde(default)]
    pub oracle: OracleLoopConfig,

    /// Correlated-price simulation parameters
    #[serde(default)]
    pub market: MarketSimConfig,

    /// Flash loan economics
    #[serde(default)]
    pub flash_loan: FlashLoanConfig,

    /// Arbitrage simulation economics
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
}

fn default_profile_name() -> String {
    "default".to_string()
}

/// Oracle loop timing and history bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleLoopConfig {
    /// Seconds between oracle ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Maximum retained price snapshots (oldest evicted first)
    #[serde(default = "default_history_cap")]
    pub price_history_cap: usize,

    /// Baseline snapshots pre-seeded at startup
    #[serde(default = "default_seed_history")]
    pub seed_history_len: usize,
}

fn default_tick_interval() -> u64 {
    10
}
fn default_history_cap() -> usize {
    50
}
fn default_seed_history() -> usize {
    20
}

impl Default for OracleLoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval(),
            price_history_cap: default_history_cap(),
            seed_history_len: default_seed_history(),
        }
    }
}

impl OracleLoopConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

/// Correlated-price simulation parameters.
///
/// Only the anchor asset is priced from the real feed; the other non-stable
/// assets follow it through a fixed multiplicative relationship plus bounded
/// jitter. A deliberately crude model, not a market simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSimConfig {
    /// BTC price as a multiple of the anchor price
    #[serde(default = "default_btc_ratio")]
    pub btc_anchor_ratio: f64,

    /// Upper bound of the uniform jitter added to the BTC quote (USD)
    #[serde(default = "default_btc_jitter")]
    pub btc_jitter_usd: f64,

    /// SOL price as a multiple of the anchor price
    #[serde(default = "default_sol_ratio")]
    pub sol_anchor_ratio: f64,

    /// Upper bound of the uniform jitter added to the SOL quote (USD)
    #[serde(default = "default_sol_jitter")]
    pub sol_jitter_usd: f64,
}

fn default_btc_ratio() -> f64 {
    15.5
}
fn default_btc_jitter() -> f64 {
    100.0
}
fn default_sol_ratio() -> f64 {
    0.05
}
fn default_sol_jitter() -> f64 {
    0.5
}

impl Default for MarketSimConfig {
    fn default() -> Self {
        Self {
            btc_anchor_ratio: default_btc_ratio(),
            btc_jitter_usd: default_btc_jitter(),
            sol_anchor_ratio: default_sol_ratio(),
            sol_jitter_usd: default_sol_jitter(),
        }
    }
}

/// Flash loan economics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashLoanConfig {
    /// Probability that the simulated arbitrage round-trip settles at a profit
    #[serde(default = "default_flash_success")]
    pub success_probability: f64,

    /// Profit credited on success, as a fraction of the requested amount
    #[serde(default = "default_flash_profit")]
    pub profit_rate: f64,

    /// Gas loss debited on failure, as a fraction of the requested amount
    #[serde(default = "default_flash_loss")]
    pub loss_rate: f64,
}

fn default_flash_success() -> f64 {
    0.8
}
fn default_flash_profit() -> f64 {
    0.005
}
fn default_flash_loss() -> f64 {
    0.001
}

impl Default for FlashLoanConfig {
    fn default() -> Self {
        Self {
            success_probability: default_flash_success(),
            profit_rate: default_flash_profit(),
            loss_rate: default_flash_loss(),
        }
    }
}

/// Arbitrage simulation economics (private-bundle style: a revert costs
/// nothing and reports the gas it saved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageConfig {
    /// Probability the simulated bundle lands
    #[serde(default = "default_arb_success")]
    pub success_probability: f64,

    /// Profit on success, as a fraction of the requested amount
    #[serde(default = "default_arb_profit")]
    pub profit_rate: f64,

    /// Base gas saved reported on a revert (USD)
    #[serde(default = "default_arb_gas_saved")]
    pub base_gas_saved_usd: f64,

    /// Upper bound of the uniform jitter added to the gas-saved figure (USD)
    #[serde(default = "default_arb_gas_jitter")]
    pub gas_saved_jitter_usd: f64,
}

fn default_arb_success() -> f64 {
    0.5
}
fn default_arb_profit() -> f64 {
    0.02
}
fn default_arb_gas_saved() -> f64 {
    45.20
}
fn default_arb_gas_jitter() -> f64 {
    10.0
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            success_probability: default_arb_success(),
            profit_rate: default_arb_profit(),
            base_gas_saved_usd: default_arb_gas_saved(),
            gas_saved_jitter_usd: default_arb_gas_jitter(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_name(),
            oracle: OracleLoopConfig::default(),
            market: MarketSimConfig::default(),
            flash_loan: FlashLoanConfig::default(),
            arbitrage: ArbitrageConfig::default(),
        }
    }
}

impl SimConfig {
    /// Fast-ticking profile for live demos.
    pub fn demo() -> Self {
        Self {
            profile: "demo".to_string(),
            oracle: OracleLoopConfig {
                tick_interval_secs: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Choppier market with worse flash-loan odds.
    pub fn turbulent() -> Self {
        Self {
            profile: "turbulent".to_string(),
            market: MarketSimConfig {
                btc_jitter_usd: 500.0,
                sol_jitter_usd: 2.5,
                ..Default::default()
            },
            flash_loan: FlashLoanConfig {
                success_probability: 0.6,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Get profile from the SIM_PROFILE environment variable, or default.
    /// Supported values: demo, turbulent
    pub fn from_env() -> Self {
        let profile = std::env::var("SIM_PROFILE").unwrap_or_else(|_| "default".to_string());
        match profile.to_lowercase().as_str() {
            "demo" => Self::demo(),
            "turbulent" => Self::turbulent(),
            _ => Self::default(),
        }
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        tracing::info!(profile = %self.profile, "Simulation configuration loaded");
        tracing::info!(
            tick_interval_secs = self.oracle.tick_interval_secs,
            history_cap = self.oracle.price_history_cap,
            "Oracle loop"
        );
        tracing::info!(
            btc_ratio = self.market.btc_anchor_ratio,
            sol_ratio = self.market.sol_anchor_ratio,
            "Correlated pricing"
        );
        tracing::info!(
            success_probability = self.flash_loan.success_probability,
            profit_rate = self.flash_loan.profit_rate,
            loss_rate = self.flash_loan.loss_rate,
            "Flash loan economics"
        );
    }
}

/// Global configuration holder using lazy initialization.
use std::sync::OnceLock;

static GLOBAL_CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// Initialize global configuration.
pub fn init_config(config: SimConfig) {
    let _ = GLOBAL_CONFIG.set(config);
}

/// Get the global configuration, initializing from environment if needed.
pub fn config() -> &'static SimConfig {
    GLOBAL_CONFIG.get_or_init(SimConfig::from_env)
}
