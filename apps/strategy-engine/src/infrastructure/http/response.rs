//! HTTP response DTOs.
//!
//! Money fields are rounded to two decimal places here, at the
//! presentation boundary; domain values stay exact.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::application::session::{LegListView, SessionSnapshot};
use crate::domain::instrument::{ContractKind, InstrumentProfile};
use crate::domain::shared::Symbol;
use crate::domain::strategy::{Leg, LegAction, PayoffBound, RiskReward, StrategySummary};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Contract parameters for one index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentResponse {
    /// Index symbol.
    pub symbol: String,
    /// Distance between adjacent strikes.
    pub strike_increment: Decimal,
    /// Units per contract.
    pub lot_size: u32,
}

impl InstrumentResponse {
    /// Build from a domain profile.
    #[must_use]
    pub fn from_profile(profile: &InstrumentProfile) -> Self {
        Self {
            symbol: profile.symbol().to_string(),
            strike_increment: profile.strike_increment(),
            lot_size: profile.lot_size(),
        }
    }
}

/// Instrument list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentsResponse {
    /// Every index with explicitly listed parameters.
    pub instruments: Vec<InstrumentResponse>,
}

/// Upcoming expiries for an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiriesResponse {
    /// Index symbol.
    pub symbol: String,
    /// Expiry dates, ascending.
    pub expiries: Vec<NaiveDate>,
}

/// Strike ladder around the current spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeLadderResponse {
    /// Index symbol.
    pub symbol: String,
    /// Strike closest to the spot.
    pub atm_strike: Decimal,
    /// Strikes in ascending order.
    pub strikes: Vec<Decimal>,
}

/// One leg with its derived money figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegResponse {
    /// Leg identifier.
    pub leg_id: String,
    /// Buy or sell.
    pub action: LegAction,
    /// Call, put, or future.
    pub kind: ContractKind,
    /// Resolved strike.
    pub strike: Decimal,
    /// Number of lots.
    pub lots: u32,
    /// Premium per unit at entry.
    pub entry_premium: Decimal,
    /// Latest mark.
    pub last_price: Decimal,
    /// Signed premium collected (positive) or paid (negative).
    pub premium_flow: Decimal,
    /// Profit and loss at the latest mark.
    pub unrealized_pnl: Decimal,
    /// Profit and loss as a percentage of the entry value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_percent: Option<Decimal>,
}

impl LegResponse {
    /// Build from a domain leg.
    #[must_use]
    pub fn from_leg(leg: &Leg, lot_size: u32) -> Self {
        Self {
            leg_id: leg.id().to_string(),
            action: leg.action(),
            kind: leg.kind(),
            strike: leg.strike().normalize(),
            lots: leg.lots(),
            entry_premium: present(leg.entry_premium()),
            last_price: present(leg.last_price()),
            premium_flow: present(leg.premium_flow(lot_size)),
            unrealized_pnl: present(leg.unrealized_pnl(lot_size)),
            pnl_percent: leg.pnl_percent(lot_size).map(present),
        }
    }
}

/// Leg list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegsResponse {
    /// Session identifier.
    pub session_id: String,
    /// Units per contract for the session's index.
    pub lot_size: u32,
    /// Legs in insertion order.
    pub legs: Vec<LegResponse>,
}

impl LegsResponse {
    /// Build from a session leg view.
    #[must_use]
    pub fn from_view(view: &LegListView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            lot_size: view.lot_size,
            legs: view
                .legs
                .iter()
                .map(|leg| LegResponse::from_leg(leg, view.lot_size))
                .collect(),
        }
    }
}

/// Risk summary for the strategy being composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Signed net premium; positive when collecting.
    pub net_premium: Decimal,
    /// Highest possible profit, or `"unbounded"`.
    pub max_profit: String,
    /// Worst possible loss, or `"unbounded"`.
    pub max_loss: String,
    /// Single indicative breakeven, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakeven: Option<Decimal>,
    /// Width of the paired strike range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_span: Option<Decimal>,
    /// Reward-to-risk ratio; `"unbounded"` when profit is open-ended,
    /// absent when undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward: Option<String>,
    /// Lots summed across every leg.
    pub total_lots: u32,
    /// Number of legs in the book.
    pub leg_count: usize,
}

impl SummaryResponse {
    /// Build from a domain summary.
    #[must_use]
    pub fn from_summary(summary: &StrategySummary) -> Self {
        Self {
            net_premium: present(summary.net_premium()),
            max_profit: bound_field(summary.max_profit()),
            max_loss: bound_field(summary.max_loss()),
            breakeven: summary.breakeven().map(present),
            strike_span: summary.strike_span().map(present),
            risk_reward: ratio_field(summary.risk_reward()),
            total_lots: summary.total_lots(),
            leg_count: summary.leg_count(),
        }
    }
}

/// Full session view with analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session identifier.
    pub session_id: String,
    /// Index symbol.
    pub symbol: String,
    /// Distance between adjacent strikes.
    pub strike_increment: Decimal,
    /// Units per contract.
    pub lot_size: u32,
    /// Expiry the legs trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    /// Latest index spot price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<Decimal>,
    /// Strike closest to the latest spot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atm_strike: Option<Decimal>,
    /// Legs in insertion order.
    pub legs: Vec<LegResponse>,
    /// Risk summary for the book.
    pub summary: SummaryResponse,
}

impl SessionResponse {
    /// Build from a session snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let lot_size = snapshot.profile.lot_size();
        Self {
            session_id: snapshot.session_id.to_string(),
            symbol: snapshot.profile.symbol().to_string(),
            strike_increment: snapshot.profile.strike_increment(),
            lot_size,
            expiry: snapshot.expiry,
            spot: snapshot.spot.map(present),
            atm_strike: snapshot.atm_strike,
            legs: snapshot
                .legs
                .iter()
                .map(|leg| LegResponse::from_leg(leg, lot_size))
                .collect(),
            summary: SummaryResponse::from_summary(&snapshot.summary),
        }
    }
}

/// One watchlist row: a symbol joined with its last traded price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Index or contract symbol.
    pub symbol: String,
    /// Last traded price, when the quote board has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltp: Option<Decimal>,
}

impl WatchlistEntry {
    /// Build a row for a symbol and its optional quote.
    #[must_use]
    pub fn new(symbol: &Symbol, ltp: Option<Decimal>) -> Self {
        Self {
            symbol: symbol.to_string(),
            ltp: ltp.map(present),
        }
    }
}

/// Watchlist response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistResponse {
    /// Rows in insertion order.
    pub symbols: Vec<WatchlistEntry>,
}

/// Quote push acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushQuotesResponse {
    /// Quotes accepted onto the board.
    pub accepted: usize,
    /// Quotes rejected for a blank symbol or non-positive price.
    pub rejected: usize,
}

/// Error payload returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

fn present(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn bound_field(bound: PayoffBound) -> String {
    match bound {
        PayoffBound::Limited(amount) => present(amount).to_string(),
        PayoffBound::Unlimited => "unbounded".to_string(),
    }
}

fn ratio_field(ratio: RiskReward) -> Option<String> {
    match ratio {
        RiskReward::Ratio(value) => Some(present(value).to_string()),
        RiskReward::Unbounded => Some("unbounded".to_string()),
        RiskReward::Undefined => None,
    }
}
