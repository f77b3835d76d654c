//! Injectable randomness for probabilistic outcomes.
//!
//! Flash-loan and arbitrage results, and the jitter on correlated quotes,
//! all draw from a [`DecisionSource`] rather than a hardcoded RNG so tests
//! can supply deterministic outcomes.

use rand::Rng;

/// Source of random decisions for the venue.
pub trait DecisionSource: Send + Sync {
    /// Bernoulli trial with the given success probability.
    fn decide(&self, success_probability: f64) -> bool;

    /// Uniform sample in `[0, bound)`.
    fn jitter(&self, bound: f64) -> f64;
}

/// Default source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl DecisionSource for ThreadRngSource {
    fn decide(&self, success_probability: f64) -> bool {
        rand::rng().random_bool(success_probability.clamp(0.0, 1.0))
    }

    fn jitter(&self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(0.0..bound)
    }
}
