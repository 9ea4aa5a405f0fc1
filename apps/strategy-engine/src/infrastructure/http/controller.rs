//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the session service and the
//! market adapters.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use tower_http::cors::{Any, CorsLayer};

use crate::application::ports::{InstrumentSource, QuoteSource};
use crate::application::session::{SessionError, SessionId, SessionService};
use crate::domain::instrument::upcoming_expiries;
use crate::domain::shared::Symbol;
use crate::domain::strategy::{
    atm_strike, strike_ladder, LegDraft, LegId, StrategyError, StrategyTemplate,
    DEFAULT_LADDER_DEPTH,
};
use crate::infrastructure::market::{ManualQuoteBoard, StaticInstrumentSource};
use crate::infrastructure::persistence::InMemoryWatchlist;

use super::request::{
    AddLegRequest, AddWatchlistRequest, ApplyTemplateRequest, CreateSessionRequest, LadderQuery,
    PushQuotesRequest,
};
use super::response::{
    ErrorResponse, ExpiriesResponse, HealthResponse, InstrumentResponse, InstrumentsResponse,
    LegsResponse, PushQuotesResponse, SessionResponse, StrikeLadderResponse, SummaryResponse,
    WatchlistEntry, WatchlistResponse,
};

/// Session service wired to the engine's concrete adapters.
pub type EngineSessionService = SessionService<ManualQuoteBoard, StaticInstrumentSource>;

/// Indian Standard Time offset from UTC, in seconds.
const IST_OFFSET_SECS: i32 = 19_800;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Strategy session service.
    pub sessions: Arc<EngineSessionService>,
    /// Quote board prices are pushed onto.
    pub quotes: Arc<ManualQuoteBoard>,
    /// Instrument parameter directory.
    pub instruments: Arc<StaticInstrumentSource>,
    /// Watchlist store.
    pub watchlist: Arc<InMemoryWatchlist>,
    /// Application version.
    pub version: &'static str,
}

impl AppState {
    /// Wire the engine's adapters together.
    #[must_use]
    pub fn new() -> Self {
        let quotes = Arc::new(ManualQuoteBoard::new());
        let instruments = Arc::new(StaticInstrumentSource::new());
        let sessions = Arc::new(SessionService::new(
            Arc::clone(&quotes),
            Arc::clone(&instruments),
        ));
        Self {
            sessions,
            quotes,
            instruments,
            watchlist: Arc::new(InMemoryWatchlist::new()),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the HTTP router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/instruments", get(list_instruments))
        .route("/v1/instruments/{symbol}/expiries", get(list_expiries))
        .route("/v1/instruments/{symbol}/strikes", get(ladder_for_symbol))
        .route("/v1/quotes", post(push_quotes))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", get(get_session).delete(delete_session))
        .route("/v1/sessions/{id}/legs", post(add_leg).delete(clear_legs))
        .route("/v1/sessions/{id}/legs/{leg_id}", delete(remove_leg))
        .route("/v1/sessions/{id}/template", post(apply_template))
        .route("/v1/sessions/{id}/summary", get(get_summary))
        .route("/v1/sessions/{id}/marks", post(refresh_marks))
        .route(
            "/v1/watchlist",
            get(get_watchlist).post(add_watchlist).delete(clear_watchlist),
        )
        .route("/v1/watchlist/{symbol}", delete(remove_watchlist))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.to_string(),
    })
}

/// Instrument list endpoint.
async fn list_instruments(State(state): State<AppState>) -> Json<InstrumentsResponse> {
    let instruments = state
        .instruments
        .known()
        .iter()
        .map(InstrumentResponse::from_profile)
        .collect();
    Json(InstrumentsResponse { instruments })
}

/// Upcoming expiries endpoint.
async fn list_expiries(Path(symbol): Path<String>) -> Result<Json<ExpiriesResponse>, ApiError> {
    let symbol = parse_symbol(&symbol)?;
    let expiries = upcoming_expiries(&symbol, today_ist());
    Ok(Json(ExpiriesResponse {
        symbol: symbol.to_string(),
        expiries,
    }))
}

/// Strike ladder endpoint.
async fn ladder_for_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<LadderQuery>,
) -> Result<Json<StrikeLadderResponse>, ApiError> {
    let symbol = parse_symbol(&symbol)?;
    let profile = state.instruments.profile(&symbol);
    let spot = state
        .quotes
        .last_price(&symbol)
        .filter(|price| *price > Decimal::ZERO)
        .ok_or_else(|| StrategyError::MissingSpotPrice {
            symbol: symbol.clone(),
        })?;
    let atm = atm_strike(spot, profile.strike_increment()).ok_or_else(|| {
        StrategyError::MissingSpotPrice {
            symbol: symbol.clone(),
        }
    })?;
    let depth = query.depth.unwrap_or(DEFAULT_LADDER_DEPTH);

    Ok(Json(StrikeLadderResponse {
        symbol: symbol.to_string(),
        atm_strike: atm,
        strikes: strike_ladder(spot, profile.strike_increment(), depth),
    }))
}

/// Quote push endpoint.
async fn push_quotes(
    State(state): State<AppState>,
    Json(request): Json<PushQuotesRequest>,
) -> Json<PushQuotesResponse> {
    let total = request.quotes.len();
    let accepted = state.quotes.set_all(
        request
            .quotes
            .into_iter()
            .filter(|quote| !quote.symbol.trim().is_empty())
            .map(|quote| (Symbol::new(quote.symbol), quote.ltp)),
    );
    Json(PushQuotesResponse {
        accepted,
        rejected: total - accepted,
    })
}

/// Create session endpoint.
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let symbol = parse_symbol(&request.symbol)?;
    let snapshot = state
        .sessions
        .create_session(&symbol, request.expiry, today_ist());
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from_snapshot(&snapshot)),
    ))
}

/// Session view endpoint.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let snapshot = state.sessions.snapshot(session_id)?;
    Ok(Json(SessionResponse::from_snapshot(&snapshot)))
}

/// Session close endpoint.
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = SessionId::parse(&id)?;
    if state.sessions.drop_session(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from(SessionError::NotFound { session_id: id }))
    }
}

/// Add leg endpoint.
async fn add_leg(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddLegRequest>,
) -> Result<(StatusCode, Json<LegsResponse>), ApiError> {
    let session_id = SessionId::parse(&id)?;
    let draft = LegDraft {
        action: request.action,
        kind: request.kind,
        selector: request.selector,
        lots: request.lots,
        entry_premium: request.entry_premium,
    };
    let view = state.sessions.add_leg(session_id, draft)?;
    Ok((StatusCode::CREATED, Json(LegsResponse::from_view(&view))))
}

/// Remove leg endpoint.
async fn remove_leg(
    State(state): State<AppState>,
    Path((id, leg_id)): Path<(String, String)>,
) -> Result<Json<LegsResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let leg_id = LegId::parse(&leg_id)?;
    let view = state.sessions.remove_leg(session_id, leg_id)?;
    Ok(Json(LegsResponse::from_view(&view)))
}

/// Clear legs endpoint.
async fn clear_legs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LegsResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let view = state.sessions.clear_legs(session_id)?;
    Ok(Json(LegsResponse::from_view(&view)))
}

/// Apply template endpoint.
async fn apply_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApplyTemplateRequest>,
) -> Result<Json<LegsResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let template: StrategyTemplate = request.template.parse()?;
    let view = state.sessions.apply_template(session_id, template)?;
    Ok(Json(LegsResponse::from_view(&view)))
}

/// Risk summary endpoint.
async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let summary = state.sessions.summary(session_id)?;
    Ok(Json(SummaryResponse::from_summary(&summary)))
}

/// Re-mark legs endpoint.
async fn refresh_marks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LegsResponse>, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let view = state.sessions.refresh_marks(session_id)?;
    Ok(Json(LegsResponse::from_view(&view)))
}

/// Watchlist endpoint.
async fn get_watchlist(State(state): State<AppState>) -> Json<WatchlistResponse> {
    Json(watchlist_response(&state))
}

/// Watchlist add endpoint.
async fn add_watchlist(
    State(state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> Result<(StatusCode, Json<WatchlistResponse>), ApiError> {
    let symbol = parse_symbol(&request.symbol)?;
    let status = if state.watchlist.add(symbol) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(watchlist_response(&state))))
}

/// Watchlist remove endpoint.
async fn remove_watchlist(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    let symbol = parse_symbol(&symbol)?;
    state.watchlist.remove(&symbol);
    Ok(Json(watchlist_response(&state)))
}

/// Watchlist clear endpoint.
async fn clear_watchlist(State(state): State<AppState>) -> Json<WatchlistResponse> {
    state.watchlist.clear();
    Json(watchlist_response(&state))
}

/// Join the watchlist with last traded prices off the quote board.
fn watchlist_response(state: &AppState) -> WatchlistResponse {
    WatchlistResponse {
        symbols: state
            .watchlist
            .symbols()
            .iter()
            .map(|symbol| WatchlistEntry::new(symbol, state.quotes.last_price(symbol)))
            .collect(),
    }
}

fn parse_symbol(raw: &str) -> Result<Symbol, ApiError> {
    let symbol = Symbol::new(raw);
    if symbol.is_empty() {
        return Err(ApiError::bad_request("symbol must not be empty"));
    }
    Ok(symbol)
}

fn today_ist() -> NaiveDate {
    let Some(offset) = FixedOffset::east_opt(IST_OFFSET_SECS) else {
        return Utc::now().date_naive();
    };
    Utc::now().with_timezone(&offset).date_naive()
}

/// API error mapped onto an HTTP status and JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }
}

impl From<StrategyError> for ApiError {
    fn from(error: StrategyError) -> Self {
        let (status, code) = match &error {
            StrategyError::CapacityExceeded { .. } => (StatusCode::CONFLICT, "LEG_LIMIT"),
            StrategyError::MissingSpotPrice { .. } => {
                (StatusCode::PRECONDITION_FAILED, "NO_SPOT_PRICE")
            }
            StrategyError::LegNotFound { .. } => (StatusCode::NOT_FOUND, "LEG_NOT_FOUND"),
            StrategyError::InvalidManualStrike { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_STRIKE")
            }
            StrategyError::InvalidLeg { .. } => (StatusCode::BAD_REQUEST, "INVALID_LEG"),
            StrategyError::UnknownTemplate { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_TEMPLATE"),
        };
        Self {
            status,
            code,
            message: error.to_string(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                code: "SESSION_NOT_FOUND",
                message: error.to_string(),
            },
            SessionError::Strategy(inner) => Self::from(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
