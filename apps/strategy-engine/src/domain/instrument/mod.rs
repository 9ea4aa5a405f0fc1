//! Instrument Context
//!
//! Contract parameters, expiry calendars, and trading symbol construction
//! for NSE/BSE index derivatives.

mod contract;
mod expiry;
mod profile;

pub use contract::{future_symbol, option_symbol, ContractKind};
pub use expiry::{expiry_weekday, nearest_expiry, upcoming_expiries, MONTHLY_MONTHS, WEEKLY_COUNT};
pub use profile::{
    known_profiles, profile_for, InstrumentProfile, DEFAULT_LOT_SIZE, DEFAULT_STRIKE_INCREMENT,
};
