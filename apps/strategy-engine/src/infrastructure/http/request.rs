//! HTTP request DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::instrument::ContractKind;
use crate::domain::strategy::{LegAction, StrikeSelector};

/// Request to open a strategy session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Index symbol to compose on.
    pub symbol: String,
    /// Expiry the legs trade. Defaults to the nearest upcoming expiry
    /// for the index.
    pub expiry: Option<NaiveDate>,
}

/// Request to add one leg to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLegRequest {
    /// Buy or sell.
    pub action: LegAction,
    /// Call, put, or future.
    pub kind: ContractKind,
    /// How the strike is chosen.
    pub selector: StrikeSelector,
    /// Number of lots.
    #[serde(default = "default_lots")]
    pub lots: u32,
    /// Premium per unit at entry.
    #[serde(default)]
    pub entry_premium: Decimal,
}

const fn default_lots() -> u32 {
    1
}

/// Request to replace the book with a named template layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyTemplateRequest {
    /// Template name, e.g. `iron_condor`.
    pub template: String,
}

/// One symbol-price pair in a quote push.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteUpdate {
    /// Index name or full contract trading symbol.
    pub symbol: String,
    /// Last traded price.
    pub ltp: Decimal,
}

/// Request to push a batch of quotes onto the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushQuotesRequest {
    /// Quotes to record.
    pub quotes: Vec<QuoteUpdate>,
}

/// Request to add a symbol to the watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWatchlistRequest {
    /// Index symbol to track.
    pub symbol: String,
}

/// Query parameters for the strike ladder endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderQuery {
    /// Strikes per side. Defaults to the standard ladder depth.
    pub depth: Option<u32>,
}
