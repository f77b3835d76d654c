//! The venue's single lending position.

use serde::{Deserialize, Serialize};

use crate::assets::ANCHOR_ASSET;

/// Position lifecycle status.
///
/// `None` and the two terminal states all admit a new open; only `Active`
/// positions are revalued by the oracle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    None,
    Active,
    Liquidated,
    Closed,
}

/// Collateralized borrow position. Exactly one logical instance exists;
/// opening overwrites whatever terminal state the previous one left behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub collateral_asset: String,
    pub collateral_amount: f64,
    /// Denominated in the stable unit
    pub loan_amount: f64,
    pub entry_price: f64,
    pub liquidation_price: f64,
    pub health_factor: f64,
    pub status: PositionStatus,
    pub realized_pnl: f64,
}

impl Position {
    pub fn is_active(&self) -> bool {
        self.status == PositionStatus::Active
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            collateral_asset: ANCHOR_ASSET.to_string(),
            collateral_amount: 0.0,
            loan_amount: 0.0,
            entry_price: 0.0,
            liquidation_price: 0.0,
            health_factor: 0.0,
            status: PositionStatus::None,
            realized_pnl: 0.0,
        }
    }
}
