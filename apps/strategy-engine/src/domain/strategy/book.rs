//! Leg Book Aggregate
//!
//! Holds the legs of one strategy in insertion order and enforces the
//! four-leg capacity shared by every supported template.

use rust_decimal::Decimal;

use super::errors::StrategyError;
use super::leg::{Leg, LegId};

/// Maximum number of legs a strategy can hold.
pub const MAX_LEGS: usize = 4;

/// The legs of one strategy, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegBook {
    legs: Vec<Leg>,
}

impl LegBook {
    /// Create an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self { legs: Vec::new() }
    }

    /// Append a leg, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::CapacityExceeded`] when the book already
    /// holds [`MAX_LEGS`] legs.
    pub fn add(&mut self, leg: Leg) -> Result<LegId, StrategyError> {
        if self.legs.len() >= MAX_LEGS {
            return Err(StrategyError::CapacityExceeded { max_legs: MAX_LEGS });
        }
        let id = leg.id();
        self.legs.push(leg);
        Ok(id)
    }

    /// Remove a leg by id, returning it.
    ///
    /// Remaining legs keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::LegNotFound`] when no leg has the id.
    pub fn remove(&mut self, leg_id: LegId) -> Result<Leg, StrategyError> {
        let index = self
            .legs
            .iter()
            .position(|leg| leg.id() == leg_id)
            .ok_or_else(|| StrategyError::LegNotFound {
                leg_id: leg_id.to_string(),
            })?;
        Ok(self.legs.remove(index))
    }

    /// Remove every leg.
    pub fn clear(&mut self) {
        self.legs.clear();
    }

    /// The legs in insertion order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Check whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Re-mark each leg with a fresh price, returning how many legs were
    /// updated. Legs the source has no price for keep their previous mark.
    pub fn mark_legs<F>(&mut self, mut price_of: F) -> usize
    where
        F: FnMut(&Leg) -> Option<Decimal>,
    {
        let mut marked = 0;
        for leg in &mut self.legs {
            if let Some(price) = price_of(leg) {
                leg.mark(price);
                marked += 1;
            }
        }
        marked
    }

    /// Total unrealized P&L across all legs.
    #[must_use]
    pub fn unrealized_pnl(&self, lot_size: u32) -> Decimal {
        self.legs.iter().map(|leg| leg.unrealized_pnl(lot_size)).sum()
    }
}
