//! Pure position risk math.
//!
//! These functions are total over their documented input domain (non-negative
//! amounts, positive prices) and never fail; callers validate inputs.

use crate::credit::RiskTier;

/// Sentinel health factor for positions with no outstanding loan.
pub const MAX_HEALTH_FACTOR: f64 = 999.0;

/// Health factor below which a position is liquidated.
pub const LIQUIDATION_HF: f64 = 1.0;

/// Health factor of a position at the given collateral price.
///
/// `HF = (collateral * price * liquidation_threshold) / loan`, the
/// standard Aave formulation. A zero loan has no liquidation risk and
/// returns [`MAX_HEALTH_FACTOR`].
pub fn health_factor(
    collateral_amount: f64,
    loan_amount: f64,
    price: f64,
    liquidation_threshold: f64,
) -> f64 {
    if loan_amount == 0.0 {
        return MAX_HEALTH_FACTOR;
    }
    (collateral_amount * price * liquidation_threshold) / loan_amount
}

/// Collateral price at which the health factor reaches exactly 1.0.
///
/// Defined as 0.0 for an empty collateral position.
pub fn liquidation_price(
    loan_amount: f64,
    collateral_amount: f64,
    liquidation_threshold: f64,
) -> f64 {
    if collateral_amount == 0.0 {
        return 0.0;
    }
    loan_amount / (collateral_amount * liquidation_threshold)
}

/// Maximum LTV available to a borrower: the asset ceiling plus the
/// tier-dependent credit boost.
pub fn max_ltv(base_ltv: f64, tier: RiskTier) -> f64 {
    base_ltv + tier.ltv_boost()
}
