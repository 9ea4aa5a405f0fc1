//! Strategy Session Service
//!
//! One session per strategy under composition. Each session pins an
//! index profile and an expiry, and carries the leg book being built.
//! The service owns every live session:
//! - **Lookup**: the session map is read-locked only long enough to
//!   clone the entry
//! - **Mutation**: each session serializes its own changes behind a
//!   dedicated mutex, so work on different sessions does not contend
//! - **Analytics**: spot, ATM strike, and the risk summary are derived
//!   on demand from the quote source, never stored

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{InstrumentSource, QuoteSource};
use crate::domain::instrument::{nearest_expiry, option_symbol, InstrumentProfile};
use crate::domain::shared::Symbol;
use crate::domain::strategy::{
    atm_strike, build_template_legs, resolve_strike, Leg, LegBook, LegDraft, LegId, StrategyError,
    StrategySummary, StrategyTemplate, SummaryInputs,
};

/// Unique identifier for a strategy session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] when the string is not a
    /// valid identifier; a malformed id can never name a live session.
    pub fn parse(value: &str) -> Result<Self, SessionError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| SessionError::NotFound {
                session_id: value.to_string(),
            })
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No live session matches the identifier.
    #[error("Session not found: {session_id}")]
    NotFound { session_id: String },

    /// A strategy rule rejected the operation.
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// One strategy under composition: the instrument, the expiry its legs
/// trade, and the leg book itself.
#[derive(Debug, Clone)]
struct StrategySession {
    id: SessionId,
    profile: InstrumentProfile,
    expiry: Option<NaiveDate>,
    book: LegBook,
}

/// Point-in-time view of a session with its derived analytics.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub session_id: SessionId,
    /// Contract parameters for the session's index.
    pub profile: InstrumentProfile,
    /// Expiry the legs trade, when one could be determined.
    pub expiry: Option<NaiveDate>,
    /// Latest spot price for the index, when known.
    pub spot: Option<Decimal>,
    /// ATM strike implied by the current spot.
    pub atm_strike: Option<Decimal>,
    /// Legs in insertion order.
    pub legs: Vec<Leg>,
    /// Risk summary for the current book.
    pub summary: StrategySummary,
}

/// Leg list returned by mutating operations, with the lot size needed
/// to present per-leg premium amounts.
#[derive(Debug, Clone)]
pub struct LegListView {
    /// Session identifier.
    pub session_id: SessionId,
    /// Units per contract for the session's index.
    pub lot_size: u32,
    /// Legs in insertion order.
    pub legs: Vec<Leg>,
}

/// Owns every live composing session.
pub struct SessionService<Q, I>
where
    Q: QuoteSource,
    I: InstrumentSource,
{
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<StrategySession>>>>,
    quotes: Arc<Q>,
    instruments: Arc<I>,
}

impl<Q, I> SessionService<Q, I>
where
    Q: QuoteSource,
    I: InstrumentSource,
{
    /// Create a service backed by the given quote and instrument ports.
    pub fn new(quotes: Arc<Q>, instruments: Arc<I>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            quotes,
            instruments,
        }
    }

    /// Open a new session for `symbol`.
    ///
    /// When no expiry is given, the nearest upcoming expiry for the
    /// index (counted from `today`, inclusive) is pinned instead.
    pub fn create_session(
        &self,
        symbol: &Symbol,
        expiry: Option<NaiveDate>,
        today: NaiveDate,
    ) -> SessionSnapshot {
        let profile = self.instruments.profile(symbol);
        let expiry = expiry.or_else(|| nearest_expiry(symbol, today));
        let session = StrategySession {
            id: SessionId::new(),
            profile,
            expiry,
            book: LegBook::new(),
        };
        let snapshot = self.snapshot_of(&session);

        self.sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(session.id, Arc::new(Mutex::new(session)));

        tracing::info!(
            session_id = %snapshot.session_id,
            symbol = %symbol,
            expiry = ?snapshot.expiry,
            "session created"
        );
        snapshot
    }

    /// Current state of a session with derived analytics.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session.
    pub fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, SessionError> {
        let entry = self.session(session_id)?;
        let session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(self.snapshot_of(&session))
    }

    /// Resolve the draft's strike against the live spot and append the
    /// leg to the session's book.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session, and
    /// wraps the strategy errors for an unresolvable strike, an invalid
    /// draft, or a full book.
    pub fn add_leg(
        &self,
        session_id: SessionId,
        draft: LegDraft,
    ) -> Result<LegListView, SessionError> {
        let entry = self.session(session_id)?;
        let mut session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let spot = self.spot_of(session.profile.symbol());
        let strike = resolve_strike(
            draft.selector,
            spot,
            session.profile.strike_increment(),
            session.profile.symbol(),
        )?;
        let leg_id = session.book.add(Leg::new(draft, strike)?)?;

        tracing::debug!(session_id = %session_id, leg_id = %leg_id, strike = %strike, "leg added");
        Ok(view_of(&session))
    }

    /// Remove one leg from the session's book.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session, and
    /// [`StrategyError::LegNotFound`] when no leg carries the id.
    pub fn remove_leg(
        &self,
        session_id: SessionId,
        leg_id: LegId,
    ) -> Result<LegListView, SessionError> {
        let entry = self.session(session_id)?;
        let mut session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let removed = session.book.remove(leg_id)?;

        tracing::debug!(session_id = %session_id, leg_id = %removed.id(), "leg removed");
        Ok(view_of(&session))
    }

    /// Drop every leg from the session's book.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session.
    pub fn clear_legs(&self, session_id: SessionId) -> Result<LegListView, SessionError> {
        let entry = self.session(session_id)?;
        let mut session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        session.book.clear();
        Ok(view_of(&session))
    }

    /// Replace the session's book with a named template layout.
    ///
    /// All strikes resolve before the existing book is touched, so a
    /// failed resolution leaves the current legs in place.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session, and
    /// [`StrategyError::MissingSpotPrice`] when no usable spot anchors
    /// the template's strikes.
    pub fn apply_template(
        &self,
        session_id: SessionId,
        template: StrategyTemplate,
    ) -> Result<LegListView, SessionError> {
        let entry = self.session(session_id)?;
        let mut session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let spot = self.spot_of(session.profile.symbol());
        let legs = build_template_legs(
            template,
            spot,
            session.profile.strike_increment(),
            session.profile.symbol(),
        )?;

        session.book.clear();
        for leg in legs {
            session.book.add(leg)?;
        }

        tracing::info!(session_id = %session_id, template = %template, "template applied");
        Ok(view_of(&session))
    }

    /// Risk summary for the session's current book.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session.
    pub fn summary(&self, session_id: SessionId) -> Result<StrategySummary, SessionError> {
        let entry = self.session(session_id)?;
        let session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(self.summarize(&session))
    }

    /// Re-mark every leg from the latest contract quotes.
    ///
    /// Legs whose contract has no quote keep their previous mark. A
    /// session without a pinned expiry cannot name its contracts and is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown session.
    pub fn refresh_marks(&self, session_id: SessionId) -> Result<LegListView, SessionError> {
        let entry = self.session(session_id)?;
        let mut session = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let Some(expiry) = session.expiry else {
            return Ok(view_of(&session));
        };
        let underlying = session.profile.symbol().clone();
        let marked = session.book.mark_legs(|leg| {
            let contract = Symbol::new(option_symbol(&underlying, expiry, leg.strike(), leg.kind()));
            self.quotes.last_price(&contract)
        });

        tracing::debug!(session_id = %session_id, marked, "legs re-marked");
        Ok(view_of(&session))
    }

    /// Close a session. Returns whether one was removed.
    pub fn drop_session(&self, session_id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&session_id)
            .is_some();
        if removed {
            tracing::info!(session_id = %session_id, "session dropped");
        }
        removed
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn session(&self, session_id: SessionId) -> Result<Arc<Mutex<StrategySession>>, SessionError> {
        self.sessions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound {
                session_id: session_id.to_string(),
            })
    }

    fn spot_of(&self, symbol: &Symbol) -> Option<Decimal> {
        self.quotes
            .last_price(symbol)
            .filter(|price| *price > Decimal::ZERO)
    }

    fn atm_of(&self, session: &StrategySession) -> Option<Decimal> {
        self.spot_of(session.profile.symbol())
            .and_then(|spot| atm_strike(spot, session.profile.strike_increment()))
    }

    fn summarize(&self, session: &StrategySession) -> StrategySummary {
        StrategySummary::compute(
            &session.book,
            SummaryInputs {
                lot_size: session.profile.lot_size(),
                atm_strike: self.atm_of(session),
            },
        )
    }

    fn snapshot_of(&self, session: &StrategySession) -> SessionSnapshot {
        SessionSnapshot {
            session_id: session.id,
            profile: session.profile.clone(),
            expiry: session.expiry,
            spot: self.spot_of(session.profile.symbol()),
            atm_strike: self.atm_of(session),
            legs: session.book.legs().to_vec(),
            summary: self.summarize(session),
        }
    }
}

fn view_of(session: &StrategySession) -> LegListView {
    LegListView {
        session_id: session.id,
        lot_size: session.profile.lot_size(),
        legs: session.book.legs().to_vec(),
    }
}
