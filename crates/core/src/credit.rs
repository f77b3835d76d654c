//! Reputation score and risk tier tracking.
//!
//! The tracker is a pure score transform: it knows nothing about positions.
//! The lifecycle manager and the flash-loan path feed it outcome kinds; the
//! risk tier is recomputed from the score on every nudge so it is never stale.

use serde::{Deserialize, Serialize};

/// Lowest reachable reputation score.
pub const SCORE_FLOOR: i32 = 300;

/// Highest reachable reputation score.
pub const SCORE_CEILING: i32 = 900;

/// Risk tier derived from the reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    /// Score >= 800
    Low,
    /// Score >= 600
    Medium,
    /// Everything below
    High,
}

impl RiskTier {
    /// Derive the tier implied by a score.
    pub fn from_score(score: i32) -> Self {
        if score >= 800 {
            Self::Low
        } else if score >= 600 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// LTV ceiling boost granted to this tier.
    pub fn ltv_boost(&self) -> f64 {
        match self {
            Self::Low => 0.05,
            Self::Medium => 0.02,
            Self::High => 0.0,
        }
    }
}

/// Outcome kinds that nudge the reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// Voluntary close with the loan repaid.
    Repay,
    /// Forced liquidation.
    Liquidation,
    /// Flash loan round-trip that settled at a profit.
    FlashLoanSuccess,
}

impl CreditOutcome {
    fn score_delta(&self) -> i32 {
        match self {
            Self::Repay => 15,
            Self::Liquidation => -50,
            Self::FlashLoanSuccess => 5,
        }
    }
}

/// Apply an outcome to a score.
///
/// Returns the clamped score and the tier it implies. Callers must store
/// both together so the tier is never stale relative to the score.
pub fn apply_outcome(score: i32, outcome: CreditOutcome) -> (i32, RiskTier) {
    let score = (score + outcome.score_delta()).clamp(SCORE_FLOOR, SCORE_CEILING);
    (score, RiskTier::from_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RiskTier::from_score(900), RiskTier::Low);
        assert_eq!(RiskTier::from_score(800), RiskTier::Low);
        assert_eq!(RiskTier::from_score(799), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(600), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(599), RiskTier::High);
        assert_eq!(RiskTier::from_score(300), RiskTier::High);
    }

    #[test]
    fn test_outcome_deltas() {
        let (score, tier) = apply_outcome(750, CreditOutcome::Repay);
        assert_eq!(score, 765);
        assert_eq!(tier, RiskTier::Medium);

        let (score, tier) = apply_outcome(750, CreditOutcome::Liquidation);
        assert_eq!(score, 700);
        assert_eq!(tier, RiskTier::Medium);

        let (score, tier) = apply_outcome(798, CreditOutcome::FlashLoanSuccess);
        assert_eq!(score, 803);
        assert_eq!(tier, RiskTier::Low);
    }

    #[test]
    fn test_score_clamped_at_ceiling() {
        let (score, tier) = apply_outcome(895, CreditOutcome::Repay);
        assert_eq!(score, SCORE_CEILING);
        assert_eq!(tier, RiskTier::Low);
    }

    #[test]
    fn test_score_clamped_at_floor() {
        let (score, tier) = apply_outcome(320, CreditOutcome::Liquidation);
        assert_eq!(score, SCORE_FLOOR);
        assert_eq!(tier, RiskTier::High);
    }

    #[test]
    fn test_score_stays_bounded_under_any_sequence() {
        let outcomes = [
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Repay,
            CreditOutcome::FlashLoanSuccess,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Liquidation,
            CreditOutcome::Repay,
        ];

        let mut score = 750;
        for outcome in outcomes {
            let (next, tier) = apply_outcome(score, outcome);
            assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&next));
            assert_eq!(tier, RiskTier::from_score(next));
            score = next;
        }
    }

    #[test]
    fn test_tier_boost() {
        assert_eq!(RiskTier::Low.ltv_boost(), 0.05);
        assert_eq!(RiskTier::Medium.ltv_boost(), 0.02);
        assert_eq!(RiskTier::High.ltv_boost(), 0.0);
    }
}
