//! Strategy Composition Errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::shared::Symbol;

/// Errors that can occur while composing a strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The leg book is full.
    #[error("Strategy already holds the maximum of {max_legs} legs")]
    CapacityExceeded { max_legs: usize },

    /// A spot-relative strike was requested without a usable spot price.
    #[error("No spot price available for {symbol}")]
    MissingSpotPrice { symbol: Symbol },

    /// A manually supplied strike was zero or negative.
    #[error("Manual strike must be positive, got {strike}")]
    InvalidManualStrike { strike: Decimal },

    /// No leg with the given identifier exists.
    #[error("Leg not found: {leg_id}")]
    LegNotFound { leg_id: String },

    /// Leg parameters failed validation.
    #[error("Invalid leg: {reason}")]
    InvalidLeg { reason: String },

    /// The template name is not recognised.
    #[error("Unknown strategy template: {name}")]
    UnknownTemplate { name: String },
}
