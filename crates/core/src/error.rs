//! Error taxonomy for venue operations.

use thiserror::Error;

/// Errors surfaced to the request layer by venue operations.
///
/// Every variant is a rejected operation: no state has been mutated when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum VenueError {
    /// The wallet does not hold enough of the asset for the requested operation.
    #[error("insufficient {asset} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        asset: String,
        requested: f64,
        available: f64,
    },

    /// The referenced symbol is not in the asset table.
    #[error("unknown asset: {0}")]
    InvalidAsset(String),
}

pub type Result<T> = std::result::Result<T, VenueError>;
