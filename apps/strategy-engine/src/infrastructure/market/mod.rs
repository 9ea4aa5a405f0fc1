//! Market Data Adapters
//!
//! Driven adapters for instrument parameters and quotes:
//! - **`StaticInstrumentSource`**: built-in index parameter table
//! - **`ManualQuoteBoard`**: prices pushed over the API, held in memory

mod instrument_directory;
mod quote_board;

pub use instrument_directory::StaticInstrumentSource;
pub use quote_board::ManualQuoteBoard;
