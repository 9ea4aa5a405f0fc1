//! Application Layer
//!
//! Orchestrates domain logic behind ports:
//! - **`ports`**: interfaces to quotes and instrument data
//! - **`session`**: the strategy session service and its views

pub mod ports;
pub mod session;

pub use ports::{InstrumentSource, QuoteSource};
pub use session::{LegListView, SessionError, SessionId, SessionService, SessionSnapshot};
