//! Application Ports
//!
//! Interfaces the session service depends on. Driven adapters live in
//! the infrastructure layer:
//! - **`QuoteSource`**: latest traded prices for indices and contracts
//! - **`InstrumentSource`**: contract parameters per index

mod instrument_source;
mod quote_source;

pub use instrument_source::InstrumentSource;
pub use quote_source::QuoteSource;
