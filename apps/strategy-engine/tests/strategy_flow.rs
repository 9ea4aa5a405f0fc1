//! Strategy Composition Integration Tests
//!
//! End-to-end flows through the session service wired to the real market
//! adapters: quote pushes land on the board, sessions resolve strikes
//! against them, and the risk summary reproduces the reference numbers
//! for the classic spreads.
//!
//! Scenarios covered:
//! - Session lifecycle and expiry pinning per index
//! - Relative strike resolution against pushed index quotes
//! - Book capacity and leg removal
//! - Template application, including atomicity on failure
//! - Short straddle and bull call spread reference summaries
//! - Mark-to-market refresh from contract quotes

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategy_engine::{
    ContractKind, LegAction, LegDraft, ManualQuoteBoard, PayoffBound, RiskReward, SessionError,
    SessionService, StaticInstrumentSource, StrategyError, StrategyTemplate, StrikeSelector,
    Symbol,
};

type Engine = SessionService<ManualQuoteBoard, StaticInstrumentSource>;

/// Wire a session service to a fresh quote board and the static
/// instrument directory.
fn make_engine() -> (Engine, Arc<ManualQuoteBoard>) {
    let quotes = Arc::new(ManualQuoteBoard::new());
    let engine = SessionService::new(Arc::clone(&quotes), Arc::new(StaticInstrumentSource::new()));
    (engine, quotes)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Reference date for the calendar: 2026-01-01 is a Thursday.
fn today() -> NaiveDate {
    date(2026, 1, 1)
}

fn draft(
    action: LegAction,
    kind: ContractKind,
    selector: StrikeSelector,
    premium: Decimal,
) -> LegDraft {
    LegDraft {
        action,
        kind,
        selector,
        lots: 1,
        entry_premium: premium,
    }
}

// ============================================
// Session Lifecycle
// ============================================

#[test]
fn test_create_session_pins_nearest_weekly_expiry() {
    let (engine, _quotes) = make_engine();

    let snapshot = engine.create_session(&Symbol::new("NIFTY"), None, today());

    // The reference Thursday is itself the first expiry.
    assert_eq!(snapshot.expiry, Some(date(2026, 1, 1)));
    assert_eq!(snapshot.profile.strike_increment(), dec!(50));
    assert_eq!(snapshot.profile.lot_size(), 25);
    assert!(snapshot.legs.is_empty());
    assert_eq!(snapshot.summary.leg_count(), 0);
    // No quote pushed yet, so no spot and no ATM anchor.
    assert_eq!(snapshot.spot, None);
    assert_eq!(snapshot.atm_strike, None);
}

#[test]
fn test_explicit_expiry_overrides_calendar() {
    let (engine, _quotes) = make_engine();
    let monthly = date(2026, 2, 26);

    let snapshot = engine.create_session(&Symbol::new("BANKNIFTY"), Some(monthly), today());

    assert_eq!(snapshot.expiry, Some(monthly));
    assert_eq!(snapshot.profile.strike_increment(), dec!(100));
    assert_eq!(snapshot.profile.lot_size(), 15);
}

#[test]
fn test_expiry_weekday_cycle_per_index() {
    let (engine, _quotes) = make_engine();
    // 2026-01-05 is a Monday.
    let monday = date(2026, 1, 5);
    let expected = [
        ("MIDCPNIFTY", date(2026, 1, 5)),
        ("FINNIFTY", date(2026, 1, 6)),
        ("BANKNIFTY", date(2026, 1, 7)),
        ("NIFTY", date(2026, 1, 8)),
        ("SENSEX", date(2026, 1, 9)),
    ];

    for (symbol, expiry) in expected {
        let snapshot = engine.create_session(&Symbol::new(symbol), None, monday);
        assert_eq!(snapshot.expiry, Some(expiry), "{symbol}");
    }
}

#[test]
fn test_unknown_index_gets_default_parameters() {
    let (engine, _quotes) = make_engine();

    let snapshot = engine.create_session(&Symbol::new("NIFTYNXT50"), None, today());

    assert_eq!(snapshot.profile.strike_increment(), dec!(50));
    assert_eq!(snapshot.profile.lot_size(), 1);
    // Unlisted symbols follow the Thursday cycle.
    assert_eq!(snapshot.expiry, Some(date(2026, 1, 1)));
}

#[test]
fn test_sessions_are_isolated() {
    let (engine, _quotes) = make_engine();
    let first = engine.create_session(&Symbol::new("NIFTY"), None, today());
    let second = engine.create_session(&Symbol::new("NIFTY"), None, today());
    assert_eq!(engine.session_count(), 2);

    engine
        .add_leg(
            first.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Manual {
                    strike: dec!(22500),
                },
                dec!(100),
            ),
        )
        .expect("manual leg should not need a spot");

    let untouched = engine.snapshot(second.session_id).unwrap();
    assert!(untouched.legs.is_empty());

    assert!(engine.drop_session(first.session_id));
    assert_eq!(engine.session_count(), 1);
    assert!(matches!(
        engine.snapshot(first.session_id),
        Err(SessionError::NotFound { .. })
    ));
    assert!(engine.snapshot(second.session_id).is_ok());
}

// ============================================
// Leg Composition
// ============================================

#[test]
fn test_relative_strikes_resolve_against_pushed_spot() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22461.15));
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Call,
                StrikeSelector::Otm { steps: 2 },
                dec!(45),
            ),
        )
        .unwrap();
    let view = engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Put,
                StrikeSelector::Itm { steps: 1 },
                dec!(70),
            ),
        )
        .unwrap();

    // ATM for 22461.15 on a 50-point grid is 22450.
    assert_eq!(view.legs.len(), 2);
    assert_eq!(view.legs[0].strike(), dec!(22550));
    assert_eq!(view.legs[1].strike(), dec!(22400));
    assert_eq!(view.lot_size, 25);

    let snapshot = engine.snapshot(session.session_id).unwrap();
    assert_eq!(snapshot.spot, Some(dec!(22461.15)));
    assert_eq!(snapshot.atm_strike, Some(dec!(22450)));
}

#[test]
fn test_missing_spot_blocks_relative_strikes_only() {
    let (engine, _quotes) = make_engine();
    let session = engine.create_session(&Symbol::new("FINNIFTY"), None, today());

    let error = engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Atm,
                dec!(90),
            ),
        )
        .unwrap_err();
    assert!(matches!(
        error,
        SessionError::Strategy(StrategyError::MissingSpotPrice { .. })
    ));

    // A manual strike needs no live quote.
    let view = engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Manual {
                    strike: dec!(21000),
                },
                dec!(90),
            ),
        )
        .unwrap();
    assert_eq!(view.legs.len(), 1);
    assert_eq!(view.legs[0].strike(), dec!(21000));
}

#[test]
fn test_book_capacity_is_enforced_at_four() {
    let (engine, _quotes) = make_engine();
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    for step in 1..=4u32 {
        engine
            .add_leg(
                session.session_id,
                draft(
                    LegAction::Sell,
                    ContractKind::Call,
                    StrikeSelector::Manual {
                        strike: Decimal::from(22_000 + step * 50),
                    },
                    dec!(10),
                ),
            )
            .unwrap();
    }

    let error = engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Put,
                StrikeSelector::Manual {
                    strike: dec!(22250),
                },
                dec!(10),
            ),
        )
        .unwrap_err();

    assert!(matches!(
        error,
        SessionError::Strategy(StrategyError::CapacityExceeded { .. })
    ));
    let snapshot = engine.snapshot(session.session_id).unwrap();
    assert_eq!(snapshot.legs.len(), 4);
}

#[test]
fn test_remove_and_clear_legs() {
    let (engine, _quotes) = make_engine();
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    let strikes = [dec!(22400), dec!(22450), dec!(22500)];
    for strike in strikes {
        engine
            .add_leg(
                session.session_id,
                draft(
                    LegAction::Buy,
                    ContractKind::Call,
                    StrikeSelector::Manual { strike },
                    dec!(50),
                ),
            )
            .unwrap();
    }

    let snapshot = engine.snapshot(session.session_id).unwrap();
    let middle = snapshot.legs[1].id();

    let view = engine.remove_leg(session.session_id, middle).unwrap();
    assert_eq!(view.legs.len(), 2);
    // Insertion order survives removal.
    assert_eq!(view.legs[0].strike(), dec!(22400));
    assert_eq!(view.legs[1].strike(), dec!(22500));

    let error = engine.remove_leg(session.session_id, middle).unwrap_err();
    assert!(matches!(
        error,
        SessionError::Strategy(StrategyError::LegNotFound { .. })
    ));

    let cleared = engine.clear_legs(session.session_id).unwrap();
    assert!(cleared.legs.is_empty());
}

// ============================================
// Templates
// ============================================

#[test]
fn test_template_replaces_existing_book() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("BANKNIFTY"), dec!(51234));
    let session = engine.create_session(&Symbol::new("BANKNIFTY"), None, today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Future,
                StrikeSelector::Manual {
                    strike: dec!(51000),
                },
                dec!(0),
            ),
        )
        .unwrap();

    let view = engine
        .apply_template(session.session_id, StrategyTemplate::IronCondor)
        .unwrap();

    // ATM for 51234 on a 100-point grid is 51200.
    assert_eq!(view.legs.len(), 4);
    assert_eq!(view.legs[0].strike(), dec!(51300));
    assert_eq!(view.legs[1].strike(), dec!(51100));
    assert_eq!(view.legs[2].strike(), dec!(51500));
    assert_eq!(view.legs[3].strike(), dec!(50900));
    // The manual future leg was replaced wholesale.
    assert!(view.legs.iter().all(|leg| leg.kind().is_option()));
}

#[test]
fn test_failed_template_keeps_current_legs() {
    let (engine, _quotes) = make_engine();
    let session = engine.create_session(&Symbol::new("SENSEX"), None, today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Put,
                StrikeSelector::Manual {
                    strike: dec!(74000),
                },
                dec!(210),
            ),
        )
        .unwrap();

    // No SENSEX quote on the board: every template strike is spot-relative.
    let error = engine
        .apply_template(session.session_id, StrategyTemplate::Straddle)
        .unwrap_err();
    assert!(matches!(
        error,
        SessionError::Strategy(StrategyError::MissingSpotPrice { .. })
    ));

    let snapshot = engine.snapshot(session.session_id).unwrap();
    assert_eq!(snapshot.legs.len(), 1);
    assert_eq!(snapshot.legs[0].strike(), dec!(74000));
}

#[test]
fn test_every_template_lays_out_expected_leg_count() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22450));

    let layouts = [
        ("straddle", 2),
        ("strangle", 2),
        ("bull_call", 2),
        ("bear_put", 2),
        ("iron_fly", 4),
        ("iron_condor", 4),
    ];

    for (name, leg_count) in layouts {
        let session = engine.create_session(&Symbol::new("NIFTY"), None, today());
        let template: StrategyTemplate = name.parse().unwrap();

        let view = engine.apply_template(session.session_id, template).unwrap();

        assert_eq!(view.legs.len(), leg_count, "{name}");
        // Template legs start at one lot and zero premium.
        assert!(view.legs.iter().all(|leg| leg.lots() == 1), "{name}");
        assert!(
            view.legs.iter().all(|leg| leg.entry_premium() == dec!(0)),
            "{name}"
        );
    }
}

// ============================================
// Risk Summary Reference Numbers
// ============================================

#[test]
fn test_short_straddle_reference_numbers() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22450));
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Atm,
                dec!(100),
            ),
        )
        .unwrap();
    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Put,
                StrikeSelector::Atm,
                dec!(100),
            ),
        )
        .unwrap();

    let summary = engine.summary(session.session_id).unwrap();

    // (100 + 100) x 1 lot x 25 units.
    assert_eq!(summary.net_premium(), dec!(5000));
    assert_eq!(summary.max_profit(), PayoffBound::Limited(dec!(5000)));
    assert_eq!(summary.max_loss(), PayoffBound::Unlimited);
    assert_eq!(summary.breakeven(), None);
    assert_eq!(summary.strike_span(), None);
    assert_eq!(summary.risk_reward(), RiskReward::Undefined);
    assert_eq!(summary.total_lots(), 2);
    assert_eq!(summary.leg_count(), 2);
}

#[test]
fn test_bull_call_spread_reference_numbers() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22450));
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Call,
                StrikeSelector::Atm,
                dec!(120),
            ),
        )
        .unwrap();
    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Otm { steps: 2 },
                dec!(40),
            ),
        )
        .unwrap();

    let summary = engine.summary(session.session_id).unwrap();

    // Debit: 40 x 25 collected against 120 x 25 paid.
    assert_eq!(summary.net_premium(), dec!(-2000));
    assert_eq!(summary.max_loss(), PayoffBound::Limited(dec!(2000)));
    // (22550 - 22450) x 25, minus the debit.
    assert_eq!(summary.strike_span(), Some(dec!(2500)));
    assert_eq!(summary.max_profit(), PayoffBound::Limited(dec!(500)));
    assert_eq!(summary.breakeven(), Some(dec!(22370)));
    assert_eq!(summary.risk_reward(), RiskReward::Ratio(dec!(0.25)));
}

#[test]
fn test_summary_never_fails_for_empty_book() {
    let (engine, _quotes) = make_engine();
    let session = engine.create_session(&Symbol::new("MIDCPNIFTY"), None, today());

    let summary = engine.summary(session.session_id).unwrap();

    assert_eq!(summary.net_premium(), dec!(0));
    assert_eq!(summary.max_profit(), PayoffBound::Limited(dec!(0)));
    assert_eq!(summary.max_loss(), PayoffBound::Limited(dec!(0)));
    assert_eq!(summary.risk_reward(), RiskReward::Undefined);
    assert_eq!(summary.total_lots(), 0);
}

#[test]
fn test_draining_a_template_book_restores_the_empty_summary() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22450));
    let session = engine.create_session(&Symbol::new("NIFTY"), None, today());

    engine
        .apply_template(session.session_id, StrategyTemplate::IronFly)
        .unwrap();

    // Remove legs one at a time rather than clearing.
    loop {
        let snapshot = engine.snapshot(session.session_id).unwrap();
        let Some(leg) = snapshot.legs.first() else {
            break;
        };
        engine.remove_leg(session.session_id, leg.id()).unwrap();
    }

    let summary = engine.summary(session.session_id).unwrap();

    assert_eq!(summary.net_premium(), dec!(0));
    assert_eq!(summary.max_profit(), PayoffBound::Limited(dec!(0)));
    assert_eq!(summary.max_loss(), PayoffBound::Limited(dec!(0)));
    assert_eq!(summary.breakeven(), None);
    assert_eq!(summary.strike_span(), None);
    assert_eq!(summary.risk_reward(), RiskReward::Undefined);
    assert_eq!(summary.total_lots(), 0);
    assert_eq!(summary.leg_count(), 0);
}

// ============================================
// Mark to Market
// ============================================

#[test]
fn test_marks_flow_from_contract_quotes() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("NIFTY"), dec!(22450));
    let session =
        engine.create_session(&Symbol::new("NIFTY"), Some(date(2026, 1, 29)), today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Sell,
                ContractKind::Call,
                StrikeSelector::Atm,
                dec!(100),
            ),
        )
        .unwrap();
    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Put,
                StrikeSelector::Atm,
                dec!(95),
            ),
        )
        .unwrap();

    // Only the call contract trades.
    quotes.set(Symbol::new("NIFTY26JAN2922450CE"), dec!(80));

    let view = engine.refresh_marks(session.session_id).unwrap();

    let call = &view.legs[0];
    assert_eq!(call.last_price(), dec!(80));
    // Short side gains as the premium decays: (100 - 80) x 25.
    assert_eq!(call.unrealized_pnl(25), dec!(500));

    // The unquoted put keeps its entry mark.
    let put = &view.legs[1];
    assert_eq!(put.last_price(), dec!(95));
    assert_eq!(put.unrealized_pnl(25), dec!(0));
}

#[test]
fn test_repeated_marking_tracks_latest_quotes() {
    let (engine, quotes) = make_engine();
    quotes.set(Symbol::new("BANKNIFTY"), dec!(51200));
    let session =
        engine.create_session(&Symbol::new("BANKNIFTY"), Some(date(2026, 1, 28)), today());

    engine
        .add_leg(
            session.session_id,
            draft(
                LegAction::Buy,
                ContractKind::Call,
                StrikeSelector::Atm,
                dec!(250),
            ),
        )
        .unwrap();

    quotes.set(Symbol::new("BANKNIFTY26JAN2851200CE"), dec!(310));
    let first = engine.refresh_marks(session.session_id).unwrap();
    // Long side gains as the premium rises: (310 - 250) x 15.
    assert_eq!(first.legs[0].unrealized_pnl(15), dec!(900));

    quotes.set(Symbol::new("BANKNIFTY26JAN2851200CE"), dec!(205));
    let second = engine.refresh_marks(session.session_id).unwrap();
    assert_eq!(second.legs[0].last_price(), dec!(205));
    assert_eq!(second.legs[0].unrealized_pnl(15), dec!(-675));
}
