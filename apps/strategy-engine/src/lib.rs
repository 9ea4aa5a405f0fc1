// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Strategy Engine - Rust Core Library
//!
//! Options-strategy composer and risk analytics for Indian index
//! derivatives.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic with no external integrations
//!   - `shared`: the `Symbol` value object
//!   - `instrument`: index parameters, expiry calendar, contract naming
//!   - `strategy`: legs, the leg book, strike resolution, templates,
//!     and the risk summary
//!
//! - **Application**: Orchestration
//!   - `ports`: interfaces for quotes and instrument data
//!   - `session`: the strategy session service
//!
//! - **Infrastructure**: Adapters
//!   - `market`: instrument directory and manual quote board
//!   - `persistence`: in-memory watchlist
//!   - `http`: REST API controller
//!   - `config`: environment-driven configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Session orchestration and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::instrument::{
    expiry_weekday, future_symbol, known_profiles, nearest_expiry, option_symbol, profile_for,
    upcoming_expiries, ContractKind, InstrumentProfile,
};
pub use domain::shared::Symbol;
pub use domain::strategy::{
    atm_strike, build_template_legs, resolve_strike, strike_ladder, Leg, LegAction, LegBook,
    LegDraft, LegId, PayoffBound, RiskReward, StrategyError, StrategySummary, StrategyTemplate,
    StrikeSelector, SummaryInputs, MAX_LEGS,
};

// Application re-exports
pub use application::ports::{InstrumentSource, QuoteSource};
pub use application::session::{
    LegListView, SessionError, SessionId, SessionService, SessionSnapshot,
};

// Infrastructure re-exports
pub use infrastructure::config::EngineConfig;
pub use infrastructure::http::{create_router, ApiError, AppState, EngineSessionService};
pub use infrastructure::market::{ManualQuoteBoard, StaticInstrumentSource};
pub use infrastructure::persistence::InMemoryWatchlist;
