//! Contract parameters per index symbol.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Strike increment applied when a symbol is not in the known table.
pub const DEFAULT_STRIKE_INCREMENT: u32 = 50;

/// Lot size applied when a symbol is not in the known table.
pub const DEFAULT_LOT_SIZE: u32 = 1;

/// Known NSE/BSE index parameters: (symbol, strike increment, lot size).
const INDEX_PARAMETERS: [(&str, u32, u32); 5] = [
    ("NIFTY", 50, 25),
    ("BANKNIFTY", 100, 15),
    ("FINNIFTY", 50, 25),
    ("MIDCPNIFTY", 25, 50),
    ("SENSEX", 100, 10),
];

/// Contract parameters for one index.
///
/// Strike increment is the grid spacing of listed strikes; lot size is the
/// number of units per contract. Both feed directly into premium and payoff
/// arithmetic, so they are resolved once per session and carried on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    symbol: Symbol,
    strike_increment: Decimal,
    lot_size: u32,
}

impl InstrumentProfile {
    /// Create a profile with explicit parameters.
    #[must_use]
    pub const fn new(symbol: Symbol, strike_increment: Decimal, lot_size: u32) -> Self {
        Self {
            symbol,
            strike_increment,
            lot_size,
        }
    }

    /// The index symbol this profile describes.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Spacing between adjacent listed strikes.
    #[must_use]
    pub const fn strike_increment(&self) -> Decimal {
        self.strike_increment
    }

    /// Units per contract.
    #[must_use]
    pub const fn lot_size(&self) -> u32 {
        self.lot_size
    }
}

/// Resolve contract parameters for a symbol.
///
/// Unknown symbols fall back to a 50-point increment and a lot size of 1,
/// so resolution never fails.
#[must_use]
pub fn profile_for(symbol: &Symbol) -> InstrumentProfile {
    let (increment, lot_size) = INDEX_PARAMETERS
        .iter()
        .find(|(name, _, _)| *name == symbol.as_str())
        .map_or((DEFAULT_STRIKE_INCREMENT, DEFAULT_LOT_SIZE), |(_, inc, lot)| {
            (*inc, *lot)
        });

    InstrumentProfile {
        symbol: symbol.clone(),
        strike_increment: Decimal::from(increment),
        lot_size,
    }
}

/// All indices with dedicated parameters, in table order.
#[must_use]
pub fn known_profiles() -> Vec<InstrumentProfile> {
    INDEX_PARAMETERS
        .iter()
        .map(|(name, _, _)| profile_for(&Symbol::new(*name)))
        .collect()
}
