//! Strike resolution relative to the at-the-money level.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::errors::StrategyError;
use crate::domain::shared::Symbol;

/// Strikes listed on each side of ATM in the default ladder.
pub const DEFAULT_LADDER_DEPTH: u32 = 20;

/// Most strikes a ladder lists on each side of ATM; deeper requests
/// are clamped to this.
pub const MAX_LADDER_DEPTH: u32 = 100;

/// Strike selection mode for a leg.
///
/// Offsets follow call convention for every leg: OTM steps up the grid,
/// ITM steps down, regardless of the contract kind they are paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrikeSelector {
    /// The grid strike nearest to spot.
    Atm,
    /// `steps` increments above ATM.
    Otm {
        /// Increments above the ATM strike. Zero degenerates to ATM.
        steps: u8,
    },
    /// `steps` increments below ATM.
    Itm {
        /// Increments below the ATM strike. Zero degenerates to ATM.
        steps: u8,
    },
    /// An explicit strike, independent of spot.
    Manual {
        /// The strike price. Must be positive.
        strike: Decimal,
    },
}

/// The at-the-money strike for a spot price.
///
/// Spot is snapped to the nearest rung of the strike grid, with midpoints
/// rounding away from zero. Returns `None` when spot or increment is not
/// positive.
#[must_use]
pub fn atm_strike(spot: Decimal, increment: Decimal) -> Option<Decimal> {
    if spot <= Decimal::ZERO || increment <= Decimal::ZERO {
        return None;
    }
    let rungs =
        (spot / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Some(rungs * increment)
}

/// Resolve a selector to a concrete strike price.
///
/// Manual strikes bypass spot entirely; every other mode requires a
/// positive spot price to anchor the ATM level.
///
/// # Errors
///
/// Returns [`StrategyError::InvalidManualStrike`] for a non-positive manual
/// strike, and [`StrategyError::MissingSpotPrice`] when a spot-relative mode
/// is used without a usable spot.
pub fn resolve_strike(
    selector: StrikeSelector,
    spot: Option<Decimal>,
    increment: Decimal,
    symbol: &Symbol,
) -> Result<Decimal, StrategyError> {
    if let StrikeSelector::Manual { strike } = selector {
        if strike <= Decimal::ZERO {
            return Err(StrategyError::InvalidManualStrike { strike });
        }
        return Ok(strike);
    }

    let atm = spot
        .filter(|value| *value > Decimal::ZERO)
        .and_then(|value| atm_strike(value, increment))
        .ok_or_else(|| StrategyError::MissingSpotPrice {
            symbol: symbol.clone(),
        })?;

    let offset = match selector {
        StrikeSelector::Otm { steps } => increment * Decimal::from(steps),
        StrikeSelector::Itm { steps } => -(increment * Decimal::from(steps)),
        StrikeSelector::Atm | StrikeSelector::Manual { .. } => Decimal::ZERO,
    };

    Ok(atm + offset)
}

/// The strike ladder around spot: `each_side` strikes below ATM through
/// `each_side` strikes above, non-positive rungs dropped. Depths past
/// [`MAX_LADDER_DEPTH`] are clamped to it.
#[must_use]
pub fn strike_ladder(spot: Decimal, increment: Decimal, each_side: u32) -> Vec<Decimal> {
    let Some(atm) = atm_strike(spot, increment) else {
        return Vec::new();
    };

    let side = i64::from(each_side.min(MAX_LADDER_DEPTH));
    (-side..=side)
        .map(|rung| atm + increment * Decimal::from(rung))
        .filter(|strike| *strike > Decimal::ZERO)
        .collect()
}
