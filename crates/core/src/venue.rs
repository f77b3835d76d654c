//! The venue: shared owner of market, position, and wallet state.
//!
//! All mutation goes through one coarse lock. Request-path operations run to
//! completion without suspending while holding it; the oracle loop fetches
//! its price first and only then applies the tick under the lock.

use chrono::Local;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::assets::{seed_price, Asset, ANCHOR_ASSET, STABLE_ASSET};
use crate::config::config;
use crate::credit::{CreditOutcome, RiskTier};
use crate::error::VenueError;
use crate::market::{MarketState, OutcomeKind, OutcomeRecord, PriceSnapshot};
use crate::position::{Position, PositionStatus};
use crate::risk;
use crate::rng::{DecisionSource, ThreadRngSource};
use crate::wallet::WalletState;

/// Side taken by a flash-loan or arbitrage request. Cosmetic in the current
/// simulation; carried through for the request layer and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Long,
    Short,
}

/// Demo/test price scenarios that bypass organic repricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    DoublePrice,
    CrashLiquidation,
    Normal,
}

impl Scenario {
    /// Anchor price this scenario pins, or `None` for the unpinning baseline.
    fn pin_price(&self) -> Option<f64> {
        match self {
            Self::DoublePrice => Some(4200.0),
            Self::CrashLiquidation => Some(800.0),
            Self::Normal => None,
        }
    }
}

/// Result of a voluntary close request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CloseOutcome {
    /// No active position; nothing happened.
    NoPosition,
    /// Position closed; realized pnl and the stable amount returned.
    Closed { pnl: f64, returned: f64 },
}

/// Result of a flash-loan round-trip.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlashLoanOutcome {
    pub succeeded: bool,
    /// Positive profit or negative gas loss, in the acted-on asset
    pub profit_or_loss: f64,
    pub new_balance: f64,
}

/// Result of a simulated private-bundle arbitrage. Pure simulation: no
/// balances move either way.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArbOutcome {
    pub succeeded: bool,
    pub profit: Option<f64>,
    pub gas_saved_usd: Option<f64>,
}

/// Read-only view of the market for the request layer.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub assets: HashMap<String, Asset>,
    pub price_history: Vec<PriceSnapshot>,
    pub position_history: Vec<OutcomeRecord>,
}

/// Read-only view of the wallet.
#[derive(Debug, Clone, Serialize)]
pub struct WalletSnapshot {
    pub balances: HashMap<String, f64>,
    pub network: String,
}

/// Read-only view of the credit standing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreditProfile {
    pub score: i32,
    pub risk_tier: RiskTier,
    pub max_ltv_boost: f64,
}

/// Why a position is being settled.
enum CloseReason {
    Voluntary,
    Liquidation,
}

struct VenueState {
    market: MarketState,
    position: Position,
    wallet: WalletState,
    pinned_scenario: Option<Scenario>,
}

impl VenueState {
    fn new() -> Self {
        Self {
            market: MarketState::new(),
            position: Position::default(),
            wallet: WalletState::new(),
            pinned_scenario: None,
        }
    }

    /// Shared close/liquidate path. Silent no-op on a non-active position:
    /// the oracle loop may fire against one that was just closed.
    fn settle(&mut self, price: f64, reason: CloseReason) -> (f64, f64) {
        if !self.position.is_active() {
            return (0.0, 0.0);
        }

        let collateral = self.position.collateral_amount;
        let (pnl, returned, outcome, credit_event, status) = match reason {
            CloseReason::Voluntary => {
                let pnl = (price - self.position.entry_price) * collateral;
                // Sell collateral, repay debt, keep the remainder. May be
                // negative on a deep-underwater close; deliberately not
                // clamped (see DESIGN.md).
                let returned = collateral * price - self.position.loan_amount;
                (
                    pnl,
                    returned,
                    OutcomeKind::Closed,
                    CreditOutcome::Repay,
                    PositionStatus::Closed,
                )
            }
            CloseReason::Liquidation => {
                // Collateral and loan are both forfeited in this model.
                let pnl = -(collateral * self.position.entry_price);
                (
                    pnl,
                    0.0,
                    OutcomeKind::Liquidated,
                    CreditOutcome::Liquidation,
                    PositionStatus::Liquidated,
                )
            }
        };

        self.wallet.credit(STABLE_ASSET, returned);
        self.wallet.record_outcome(credit_event);

        self.market.push_outcome(OutcomeRecord {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            collateral: self.position.collateral_asset.clone(),
            amount: collateral,
            pnl,
            result: outcome,
        });

        self.position.status = status;
        self.position.realized_pnl = pnl;
        // Health factor and liquidation price freeze at their last computed
        // values once the position leaves Active.

        info!(status = ?status, pnl, returned, "position settled");
        (pnl, returned)
    }
}

/// The lending venue. One per process; shared between the oracle loop and
/// the request layer behind `Arc`.
pub struct Venue {
    state: RwLock<VenueState>,
    decisions: Arc<dyn DecisionSource>,
}

impl Venue {
    pub fn new() -> Self {
        Self::with_decisions(Arc::new(ThreadRngSource))
    }

    /// Construct with an explicit decision source (deterministic in tests).
    pub fn with_decisions(decisions: Arc<dyn DecisionSource>) -> Self {
        Self {
            state: RwLock::new(VenueState::new()),
            decisions,
        }
    }

    /// Open a position: lock collateral, borrow the stable unit against it
    /// up to the credit-boosted LTV ceiling.
    ///
    /// Returns the loan amount. Fails atomically: a rejected open leaves
    /// wallet and position untouched.
    pub fn open_position(
        &self,
        asset: &str,
        amount: f64,
        requested_ltv: f64,
    ) -> Result<f64, VenueError> {
        let mut state = self.state.write();

        let (price, base_ltv, threshold) = {
            let data = state
                .market
                .asset(asset)
                .ok_or_else(|| VenueError::InvalidAsset(asset.to_string()))?;
            (data.price, data.ltv, data.liquidation_threshold)
        };

        // Lock collateral; fails before any mutation.
        state.wallet.debit(asset, amount)?;

        let ltv = requested_ltv.min(risk::max_ltv(base_ltv, state.wallet.risk_tier()));
        let loan = amount * price * ltv;
        state.wallet.credit(STABLE_ASSET, loan);

        state.position = Position {
            collateral_asset: asset.to_string(),
            collateral_amount: amount,
            loan_amount: loan,
            entry_price: price,
            liquidation_price: risk::liquidation_price(loan, amount, threshold),
            health_factor: risk::health_factor(amount, loan, price, threshold),
            status: PositionStatus::Active,
            realized_pnl: 0.0,
        };

        info!(asset, amount, entry_price = price, ltv, loan, "position opened");
        Ok(loan)
    }

    /// Voluntarily close the active position at the current price.
    pub fn close_position(&self) -> CloseOutcome {
        let mut state = self.state.write();
        if !state.position.is_active() {
            return CloseOutcome::NoPosition;
        }

        let price = state
            .market
            .asset(&state.position.collateral_asset)
            .map(|a| a.price)
            .unwrap_or(state.position.entry_price);

        let (pnl, returned) = state.settle(price, CloseReason::Voluntary);
        CloseOutcome::Closed { pnl, returned }
    }

    /// Apply one oracle tick: reprice (unless a scenario is pinned),
    /// snapshot history, revalue the active position, and liquidate when it
    /// crosses the threshold.
    ///
    /// The caller fetched `anchor_price` without holding the venue lock.
    pub fn apply_tick(&self, anchor_price: f64) {
        let mut state = self.state.write();

        if state.pinned_scenario.is_none() {
            for (symbol, price) in self.derive_quotes(anchor_price) {
                state.market.set_price(symbol, price);
            }
        } else {
            debug!(
                scenario = ?state.pinned_scenario,
                "scenario pinned, organic repricing suspended"
            );
        }

        state
            .market
            .record_snapshot(Local::now().format("%H:%M:%S").to_string());

        self.revalue_position(&mut state);
    }

    /// Anchor quote plus correlated quotes for the other non-stable assets.
    /// The correlation is a crude fixed ratio with bounded jitter, not a
    /// market model.
    fn derive_quotes(&self, anchor_price: f64) -> SmallVec<[(&'static str, f64); 4]> {
        let sim = &config().market;
        let mut quotes: SmallVec<[(&'static str, f64); 4]> = SmallVec::new();
        quotes.push((ANCHOR_ASSET, anchor_price));
        quotes.push((
            "BTC",
            anchor_price * sim.btc_anchor_ratio + self.decisions.jitter(sim.btc_jitter_usd),
        ));
        quotes.push((
            "SOL",
            anchor_price * sim.sol_anchor_ratio + self.decisions.jitter(sim.sol_jitter_usd),
        ));
        quotes
    }

    fn revalue_position(&self, state: &mut VenueState) {
        if !state.position.is_active() {
            return;
        }

        let (price, threshold) = match state.market.asset(&state.position.collateral_asset) {
            Some(asset) => (asset.price, asset.liquidation_threshold),
            None => return,
        };

        let hf = risk::health_factor(
            state.position.collateral_amount,
            state.position.loan_amount,
            price,
            threshold,
        );
        state.position.health_factor = hf;

        if hf < risk::LIQUIDATION_HF {
            warn!(health_factor = hf, price, "health factor below 1.0, liquidating");
            state.settle(price, CloseReason::Liquidation);
        }
    }

    /// Pin a demo scenario (or unpin with [`Scenario::Normal`]). While a
    /// scenario is pinned the oracle loop stops applying fetched prices.
    pub fn force_scenario(&self, scenario: Scenario) {
        let mut state = self.state.write();
        match scenario.pin_price() {
            Some(price) => {
                state.market.set_price(ANCHOR_ASSET, price);
                state.pinned_scenario = Some(scenario);
            }
            None => {
                let baseline = seed_price(ANCHOR_ASSET).unwrap_or(2000.0);
                state.market.set_price(ANCHOR_ASSET, baseline);
                state.pinned_scenario = None;
            }
        }
        info!(scenario = ?scenario, "price scenario applied");
    }

    /// Restore seed balances, reputation, and the anchor price; clear the
    /// position and any pinned scenario. History logs survive.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.wallet = WalletState::new();
        state.position = Position::default();
        let baseline = seed_price(ANCHOR_ASSET).unwrap_or(2000.0);
        state.market.set_price(ANCHOR_ASSET, baseline);
        state.pinned_scenario = None;
        info!("venue reset to baseline");
    }

    /// Borrow → trade → repay in one synthetic transaction. Probabilistic:
    /// success credits a small profit and nudges the credit score; failure
    /// debits the gas loss.
    ///
    /// The wallet must hold the worst-case gas loss upfront so the
    /// operation stays atomic.
    pub fn execute_flash_loan(
        &self,
        asset: &str,
        amount: f64,
        direction: TradeDirection,
    ) -> Result<FlashLoanOutcome, VenueError> {
        let mut state = self.state.write();

        if state.market.asset(asset).is_none() {
            return Err(VenueError::InvalidAsset(asset.to_string()));
        }

        let economics = &config().flash_loan;
        let worst_case_loss = amount * economics.loss_rate;
        let available = state.wallet.balance(asset);
        if available < worst_case_loss {
            return Err(VenueError::InsufficientBalance {
                asset: asset.to_string(),
                requested: worst_case_loss,
                available,
            });
        }

        let succeeded = self.decisions.decide(economics.success_probability);
        let profit_or_loss = if succeeded {
            let profit = amount * economics.profit_rate;
            state.wallet.credit(asset, profit);
            state.wallet.record_outcome(CreditOutcome::FlashLoanSuccess);
            profit
        } else {
            state.wallet.debit(asset, worst_case_loss)?;
            -worst_case_loss
        };

        state.market.push_outcome(OutcomeRecord {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            collateral: asset.to_string(),
            amount,
            pnl: profit_or_loss,
            result: OutcomeKind::FlashLoan,
        });

        info!(
            asset,
            amount,
            direction = ?direction,
            succeeded,
            profit_or_loss,
            "flash loan executed"
        );

        Ok(FlashLoanOutcome {
            succeeded,
            profit_or_loss,
            new_balance: state.wallet.balance(asset),
        })
    }

    /// Simulate submitting an arbitrage bundle through a private relay: a
    /// revert never lands on-chain, so failure only reports the gas saved.
    pub fn simulate_arbitrage(
        &self,
        asset: &str,
        amount: f64,
        direction: TradeDirection,
    ) -> Result<ArbOutcome, VenueError> {
        {
            let state = self.state.read();
            if state.market.asset(asset).is_none() {
                return Err(VenueError::InvalidAsset(asset.to_string()));
            }
        }

        let economics = &config().arbitrage;
        let succeeded = self.decisions.decide(economics.success_probability);
        let outcome = if succeeded {
            ArbOutcome {
                succeeded: true,
                profit: Some(amount * economics.profit_rate),
                gas_saved_usd: None,
            }
        } else {
            ArbOutcome {
                succeeded: false,
                profit: None,
                gas_saved_usd: Some(
                    economics.base_gas_saved_usd
                        + self.decisions.jitter(economics.gas_saved_jitter_usd),
                ),
            }
        };

        info!(
            asset,
            amount,
            direction = ?direction,
            succeeded = outcome.succeeded,
            "arbitrage bundle simulated"
        );
        Ok(outcome)
    }

    pub fn position_snapshot(&self) -> Position {
        self.state.read().position.clone()
    }

    pub fn market_snapshot(&self) -> MarketSnapshot {
        let state = self.state.read();
        MarketSnapshot {
            assets: state.market.assets().clone(),
            price_history: state.market.price_history().iter().cloned().collect(),
            position_history: state.market.position_history().to_vec(),
        }
    }

    pub fn wallet_snapshot(&self) -> WalletSnapshot {
        let state = self.state.read();
        WalletSnapshot {
            balances: state.wallet.balances().clone(),
            network: state.wallet.network().to_string(),
        }
    }

    pub fn credit_profile(&self) -> CreditProfile {
        let state = self.state.read();
        let tier = state.wallet.risk_tier();
        CreditProfile {
            score: state.wallet.reputation_score(),
            risk_tier: tier,
            max_ltv_boost: tier.ltv_boost(),
        }
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic decision source: fixed outcome, zero jitter.
    struct FixedDecisions(bool);

    impl DecisionSource for FixedDecisions {
        fn decide(&self, _success_probability: f64) -> bool {
            self.0
        }

        fn jitter(&self, _bound: f64) -> f64 {
            0.0
        }
    }

    fn deterministic_venue(outcome: bool) -> Venue {
        Venue::with_decisions(Arc::new(FixedDecisions(outcome)))
    }

    #[test]
    fn test_open_loan_math() {
        let venue = deterministic_venue(true);

        // Requested 0.5 is under the Medium-tier cap of 0.82
        let loan = venue.open_position("ETH", 1.0, 0.5).unwrap();
        assert_eq!(loan, 1000.0);

        let position = venue.position_snapshot();
        assert_eq!(position.status, PositionStatus::Active);
        assert_eq!(position.entry_price, 2000.0);
        assert!((position.liquidation_price - 1176.470588).abs() < 1e-3);
        // Recomputed on admission, not a placeholder
        assert!((position.health_factor - 1.7).abs() < 1e-9);

        let wallet = venue.wallet_snapshot();
        assert_eq!(wallet.balances["ETH"], 9.0);
        assert_eq!(wallet.balances["USDC"], 11_000.0);
    }

    #[test]
    fn test_requested_ltv_capped_by_tier() {
        let venue = deterministic_venue(true);

        // Seed score 750 -> Medium tier -> 0.80 + 0.02 cap
        let loan = venue.open_position("ETH", 1.0, 0.9).unwrap();
        assert!((loan - 1640.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_tier_unlocks_bigger_loans() {
        let venue = deterministic_venue(true);

        // Four repay outcomes lift the score from 750 to 810 (Low tier)
        for _ in 0..4 {
            venue.open_position("ETH", 1.0, 0.5).unwrap();
            assert!(matches!(venue.close_position(), CloseOutcome::Closed { .. }));
        }
        assert_eq!(venue.credit_profile().risk_tier, RiskTier::Low);

        let loan = venue.open_position("ETH", 1.0, 0.9).unwrap();
        assert!((loan - 1700.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_insufficient_balance_is_atomic() {
        let venue = deterministic_venue(true);

        let err = venue.open_position("ETH", 11.0, 0.5).unwrap_err();
        assert!(matches!(err, VenueError::InsufficientBalance { .. }));

        let wallet = venue.wallet_snapshot();
        assert_eq!(wallet.balances["ETH"], 10.0);
        assert_eq!(wallet.balances["USDC"], 10_000.0);
        assert_eq!(venue.position_snapshot().status, PositionStatus::None);
    }

    #[test]
    fn test_open_unknown_asset() {
        let venue = deterministic_venue(true);
        let err = venue.open_position("DOGE", 1.0, 0.5).unwrap_err();
        assert!(matches!(err, VenueError::InvalidAsset(_)));
    }

    #[test]
    fn test_crash_tick_liquidates() {
        let venue = deterministic_venue(true);
        venue.open_position("ETH", 1.0, 0.5).unwrap();

        venue.apply_tick(800.0);

        let position = venue.position_snapshot();
        assert_eq!(position.status, PositionStatus::Liquidated);
        assert_eq!(position.realized_pnl, -2000.0);
        // Frozen at the liquidating value
        assert!((position.health_factor - 0.68).abs() < 1e-9);

        let wallet = venue.wallet_snapshot();
        // Loan proceeds kept, collateral forfeited, no stable return
        assert_eq!(wallet.balances["USDC"], 11_000.0);
        assert_eq!(wallet.balances["ETH"], 9.0);

        assert_eq!(venue.credit_profile().score, 700);

        let market = venue.market_snapshot();
        let record = &market.position_history[0];
        assert_eq!(record.result, OutcomeKind::Liquidated);
        assert_eq!(record.pnl, -2000.0);
        assert_eq!(record.collateral, "ETH");
    }

    #[test]
    fn test_voluntary_close_at_profit() {
        let venue = deterministic_venue(true);
        venue.open_position("ETH", 1.0, 0.5).unwrap();

        venue.apply_tick(3000.0);
        let outcome = venue.close_position();
        match outcome {
            CloseOutcome::Closed { pnl, returned } => {
                assert_eq!(pnl, 1000.0);
                assert_eq!(returned, 2000.0);
            }
            CloseOutcome::NoPosition => panic!("expected a close"),
        }

        let wallet = venue.wallet_snapshot();
        assert_eq!(wallet.balances["USDC"], 13_000.0);
        assert_eq!(venue.credit_profile().score, 765);

        let position = venue.position_snapshot();
        assert_eq!(position.status, PositionStatus::Closed);
        assert_eq!(position.realized_pnl, 1000.0);
    }

    #[test]
    fn test_underwater_close_goes_negative() {
        let venue = deterministic_venue(true);
        venue.open_position("ETH", 1.0, 0.5).unwrap();

        // Crash the price without a tick: the position is not revalued, so
        // it is still Active and closable below its liquidation price
        venue.force_scenario(Scenario::CrashLiquidation);
        let outcome = venue.close_position();
        match outcome {
            CloseOutcome::Closed { pnl, returned } => {
                assert_eq!(pnl, -1200.0);
                // Collateral value 800 no longer covers the 1000 loan; the
                // shortfall is debited from the stable balance unclamped
                assert_eq!(returned, -200.0);
            }
            CloseOutcome::NoPosition => panic!("expected a close"),
        }

        assert_eq!(venue.wallet_snapshot().balances["USDC"], 10_800.0);
    }

    #[test]
    fn test_close_without_position_is_noop() {
        let venue = deterministic_venue(true);
        assert_eq!(venue.close_position(), CloseOutcome::NoPosition);

        venue.open_position("ETH", 1.0, 0.5).unwrap();
        assert!(matches!(venue.close_position(), CloseOutcome::Closed { .. }));
        assert_eq!(venue.close_position(), CloseOutcome::NoPosition);
    }

    #[test]
    fn test_tick_after_close_does_not_resettle() {
        let venue = deterministic_venue(true);
        venue.open_position("ETH", 1.0, 0.5).unwrap();
        venue.close_position();

        let records_before = venue.market_snapshot().position_history.len();
        venue.apply_tick(800.0);

        let market = venue.market_snapshot();
        assert_eq!(market.position_history.len(), records_before);
        assert_eq!(venue.position_snapshot().status, PositionStatus::Closed);
    }

    #[test]
    fn test_pinned_scenario_suspends_repricing() {
        let venue = deterministic_venue(true);

        venue.force_scenario(Scenario::CrashLiquidation);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 800.0);

        // Fetched price must not overwrite the pin
        venue.apply_tick(2500.0);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 800.0);

        venue.force_scenario(Scenario::Normal);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 2000.0);

        venue.apply_tick(2500.0);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 2500.0);
    }

    #[test]
    fn test_tick_derives_correlated_quotes() {
        let venue = deterministic_venue(true);
        venue.apply_tick(2000.0);

        let market = venue.market_snapshot();
        // Zero jitter in tests: pure ratios
        assert_eq!(market.assets["BTC"].price, 2000.0 * 15.5);
        assert_eq!(market.assets["SOL"].price, 2000.0 * 0.05);
        // The stable unit never moves
        assert_eq!(market.assets["USDC"].price, 1.0);
    }

    #[test]
    fn test_flash_loan_success() {
        let venue = deterministic_venue(true);
        let outcome = venue
            .execute_flash_loan("USDC", 1000.0, TradeDirection::Long)
            .unwrap();

        assert!(outcome.succeeded);
        assert_eq!(outcome.profit_or_loss, 5.0);
        assert_eq!(outcome.new_balance, 10_005.0);
        assert_eq!(venue.credit_profile().score, 755);

        let record = &venue.market_snapshot().position_history[0];
        assert_eq!(record.result, OutcomeKind::FlashLoan);
        assert_eq!(record.pnl, 5.0);
    }

    #[test]
    fn test_flash_loan_failure_costs_gas() {
        let venue = deterministic_venue(false);
        let outcome = venue
            .execute_flash_loan("USDC", 1000.0, TradeDirection::Short)
            .unwrap();

        assert!(!outcome.succeeded);
        assert_eq!(outcome.profit_or_loss, -1.0);
        assert_eq!(outcome.new_balance, 9999.0);
        // Failures do not touch the credit score
        assert_eq!(venue.credit_profile().score, 750);
    }

    #[test]
    fn test_flash_loan_requires_worst_case_gas() {
        let venue = deterministic_venue(false);

        // SOL balance is 100; a 200k request risks a 200 gas loss
        let err = venue
            .execute_flash_loan("SOL", 200_000.0, TradeDirection::Long)
            .unwrap_err();
        assert!(matches!(err, VenueError::InsufficientBalance { .. }));
        assert_eq!(venue.wallet_snapshot().balances["SOL"], 100.0);
    }

    #[test]
    fn test_flash_loan_unknown_asset() {
        let venue = deterministic_venue(true);
        let err = venue
            .execute_flash_loan("DOGE", 100.0, TradeDirection::Long)
            .unwrap_err();
        assert!(matches!(err, VenueError::InvalidAsset(_)));
    }

    #[test]
    fn test_arbitrage_simulation_moves_no_balances() {
        let success = deterministic_venue(true);
        let outcome = success
            .simulate_arbitrage("ETH", 5000.0, TradeDirection::Long)
            .unwrap();
        assert!(outcome.succeeded);
        assert_eq!(outcome.profit, Some(100.0));
        assert_eq!(outcome.gas_saved_usd, None);
        assert_eq!(success.wallet_snapshot().balances, WalletState::new().balances().clone());

        let revert = deterministic_venue(false);
        let outcome = revert
            .simulate_arbitrage("ETH", 5000.0, TradeDirection::Long)
            .unwrap();
        assert!(!outcome.succeeded);
        assert_eq!(outcome.profit, None);
        assert_eq!(outcome.gas_saved_usd, Some(45.20));
    }

    #[test]
    fn test_reset_restores_baseline() {
        let venue = deterministic_venue(true);

        venue.open_position("ETH", 2.0, 0.5).unwrap();
        venue.force_scenario(Scenario::CrashLiquidation);
        venue.apply_tick(800.0);
        assert_eq!(venue.position_snapshot().status, PositionStatus::Liquidated);

        venue.reset();

        let wallet = venue.wallet_snapshot();
        assert_eq!(wallet.balances["ETH"], 10.0);
        assert_eq!(wallet.balances["USDC"], 10_000.0);
        assert_eq!(venue.credit_profile().score, 750);
        assert_eq!(venue.position_snapshot().status, PositionStatus::None);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 2000.0);

        // Unpinned again: organic ticks reprice
        venue.apply_tick(2100.0);
        assert_eq!(venue.market_snapshot().assets["ETH"].price, 2100.0);
    }

    #[test]
    fn test_credit_profile_reports_boost() {
        let venue = deterministic_venue(true);
        let profile = venue.credit_profile();
        assert_eq!(profile.score, 750);
        assert_eq!(profile.risk_tier, RiskTier::Medium);
        assert_eq!(profile.max_ltv_boost, 0.02);
    }
}
