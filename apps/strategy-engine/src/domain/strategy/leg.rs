//! Strategy Leg Value Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::StrategyError;
use super::strike::StrikeSelector;
use crate::domain::instrument::ContractKind;

/// Leg action (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegAction {
    /// Long the contract (premium paid).
    Buy,
    /// Short the contract (premium received).
    Sell,
}

impl LegAction {
    /// Premium flow sign: sells collect premium, buys pay it.
    #[must_use]
    pub const fn premium_sign(&self) -> i32 {
        match self {
            Self::Sell => 1,
            Self::Buy => -1,
        }
    }

    /// Check if this is a buy leg.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Check if this is a sell leg.
    #[must_use]
    pub const fn is_sell(&self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl std::fmt::Display for LegAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Unique identifier for a leg within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegId(Uuid);

impl LegId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::LegNotFound`] when the string is not a
    /// valid identifier; a malformed id can never match a stored leg.
    pub fn parse(value: &str) -> Result<Self, StrategyError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| StrategyError::LegNotFound {
                leg_id: value.to_string(),
            })
    }
}

impl Default for LegId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for a leg before its strike is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegDraft {
    /// Buy or sell.
    pub action: LegAction,
    /// Call, put, or future.
    pub kind: ContractKind,
    /// How the strike is chosen.
    pub selector: StrikeSelector,
    /// Number of lots.
    pub lots: u32,
    /// Premium per unit at entry.
    pub entry_premium: Decimal,
}

/// A single leg of an options strategy.
///
/// Constructed only through [`Leg::new`], which validates lot count,
/// entry premium, and the resolved strike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    id: LegId,
    action: LegAction,
    kind: ContractKind,
    selector: StrikeSelector,
    strike: Decimal,
    lots: u32,
    entry_premium: Decimal,
    last_price: Decimal,
}

impl Leg {
    /// Create a validated leg from a draft and its resolved strike.
    ///
    /// The mark price starts at the entry premium, so a fresh leg carries
    /// zero unrealized P&L.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::InvalidLeg`] when lots is zero, the entry
    /// premium is negative, or the strike is not positive.
    pub fn new(draft: LegDraft, strike: Decimal) -> Result<Self, StrategyError> {
        if draft.lots == 0 {
            return Err(StrategyError::InvalidLeg {
                reason: "lots must be at least 1".to_string(),
            });
        }
        if draft.entry_premium < Decimal::ZERO {
            return Err(StrategyError::InvalidLeg {
                reason: "entry premium cannot be negative".to_string(),
            });
        }
        if strike <= Decimal::ZERO {
            return Err(StrategyError::InvalidLeg {
                reason: "strike must be positive".to_string(),
            });
        }

        Ok(Self {
            id: LegId::new(),
            action: draft.action,
            kind: draft.kind,
            selector: draft.selector,
            strike,
            lots: draft.lots,
            entry_premium: draft.entry_premium,
            last_price: draft.entry_premium,
        })
    }

    /// Get the leg identifier.
    #[must_use]
    pub const fn id(&self) -> LegId {
        self.id
    }

    /// Get the action.
    #[must_use]
    pub const fn action(&self) -> LegAction {
        self.action
    }

    /// Get the contract kind.
    #[must_use]
    pub const fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Get the strike selector the leg was created with.
    #[must_use]
    pub const fn selector(&self) -> StrikeSelector {
        self.selector
    }

    /// Get the resolved strike.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the lot count.
    #[must_use]
    pub const fn lots(&self) -> u32 {
        self.lots
    }

    /// Get the premium per unit at entry.
    #[must_use]
    pub const fn entry_premium(&self) -> Decimal {
        self.entry_premium
    }

    /// Get the most recent mark price.
    #[must_use]
    pub const fn last_price(&self) -> Decimal {
        self.last_price
    }

    /// Update the mark price.
    pub const fn mark(&mut self, price: Decimal) {
        self.last_price = price;
    }

    /// Signed premium flow at entry: positive for credit, negative for debit.
    #[must_use]
    pub fn premium_flow(&self, lot_size: u32) -> Decimal {
        Decimal::from(self.action.premium_sign())
            * self.entry_premium
            * Decimal::from(self.lots)
            * Decimal::from(lot_size)
    }

    /// Unrealized P&L against the current mark price.
    #[must_use]
    pub fn unrealized_pnl(&self, lot_size: u32) -> Decimal {
        let per_unit = match self.action {
            LegAction::Buy => self.last_price - self.entry_premium,
            LegAction::Sell => self.entry_premium - self.last_price,
        };
        per_unit * Decimal::from(self.lots) * Decimal::from(lot_size)
    }

    /// Unrealized P&L as a percentage of the entry premium outlay.
    ///
    /// Returns `None` when the entry premium is zero (template legs before
    /// their premiums are filled in).
    #[must_use]
    pub fn pnl_percent(&self, lot_size: u32) -> Option<Decimal> {
        let basis = self.entry_premium * Decimal::from(self.lots) * Decimal::from(lot_size);
        if basis == Decimal::ZERO {
            return None;
        }
        Some(self.unrealized_pnl(lot_size) / basis * Decimal::ONE_HUNDRED)
    }
}
