//! Lending venue core logic.
//!
//! This crate provides the simulated collateralized-lending venue:
//! - Seed asset table with LTV ceilings and liquidation thresholds
//! - Pure risk math (health factor, liquidation price, credit-boosted LTV)
//! - Single-position lifecycle (open / close / liquidate)
//! - Reputation score and risk tier feedback from outcomes
//! - Oracle loop driving repricing and engine-triggered liquidation
//!
//! HTTP routing and wire shapes live outside this crate; the request layer
//! consumes [`Venue`] directly.

mod assets;
pub mod config;
mod credit;
mod error;
mod market;
mod position;
pub mod risk;
mod rng;
mod ticker;
mod venue;
mod wallet;

pub use assets::{seed_assets, Asset, AssetDef, ANCHOR_ASSET, SEED_ASSETS, STABLE_ASSET};
pub use config::{config, init_config, SimConfig};
pub use credit::{apply_outcome, CreditOutcome, RiskTier, SCORE_CEILING, SCORE_FLOOR};
pub use error::{Result, VenueError};
pub use market::{MarketState, OutcomeKind, OutcomeRecord, PriceSnapshot};
pub use position::{Position, PositionStatus};
pub use rng::{DecisionSource, ThreadRngSource};
pub use ticker::OracleLoop;
pub use venue::{
    ArbOutcome, CloseOutcome, CreditProfile, FlashLoanOutcome, MarketSnapshot, Scenario,
    TradeDirection, Venue, WalletSnapshot,
};
pub use wallet::WalletState;
