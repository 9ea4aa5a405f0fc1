//! Strategy Composition Context
//!
//! This module handles multi-leg strategy composition, including:
//! - Strike resolution relative to the at-the-money level
//! - The four-leg book aggregate with insertion-order semantics
//! - Predefined templates (straddles, spreads, flies, condors)
//! - Risk summary analytics (premium, payoff bounds, breakeven)

mod book;
mod errors;
mod leg;
mod strike;
mod summary;
mod templates;

pub use book::{LegBook, MAX_LEGS};
pub use errors::StrategyError;
pub use leg::{Leg, LegAction, LegDraft, LegId};
pub use strike::{
    atm_strike, resolve_strike, strike_ladder, StrikeSelector, DEFAULT_LADDER_DEPTH,
    MAX_LADDER_DEPTH,
};
pub use summary::{PayoffBound, RiskReward, StrategySummary, SummaryInputs};
pub use templates::{build_template_legs, LegBlueprint, StrategyTemplate};
