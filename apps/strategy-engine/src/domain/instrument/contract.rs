//! Trading symbol construction for NSE index derivatives.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Contract kind (call, put, or future).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractKind {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
    /// Index future.
    Future,
}

impl ContractKind {
    /// NSE suffix for this contract kind.
    #[must_use]
    pub const fn nse_code(&self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
            Self::Future => "FUT",
        }
    }

    /// Check if this is an option kind.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::Call | Self::Put)
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
            Self::Future => write!(f, "FUTURE"),
        }
    }
}

/// Build the NSE trading symbol for an option contract.
///
/// Format: `{SYMBOL}{YY}{MON}{DD}{STRIKE}{CE|PE}`, e.g.
/// `NIFTY26JAN2922500CE`. Integral strikes are rendered without a
/// decimal point.
#[must_use]
pub fn option_symbol(
    underlying: &Symbol,
    expiry: NaiveDate,
    strike: Decimal,
    kind: ContractKind,
) -> String {
    if !kind.is_option() {
        return future_symbol(underlying, expiry);
    }
    format!(
        "{underlying}{}{}{}",
        expiry_code(expiry),
        strike.normalize(),
        kind.nse_code()
    )
}

/// Build the NSE trading symbol for an index future.
///
/// Format: `{SYMBOL}{YY}{MON}{DD}FUT`, e.g. `NIFTY26JAN29FUT`.
#[must_use]
pub fn future_symbol(underlying: &Symbol, expiry: NaiveDate) -> String {
    format!("{underlying}{}FUT", expiry_code(expiry))
}

fn expiry_code(expiry: NaiveDate) -> String {
    expiry.format("%y%b%d").to_string().to_uppercase()
}
