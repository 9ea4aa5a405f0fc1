//! Quote Source (Driven Port)

use rust_decimal::Decimal;

use crate::domain::shared::Symbol;

/// Read access to the latest traded prices.
///
/// Keys are plain index names (`NIFTY`) or full contract trading
/// symbols (`NIFTY26JAN2922450CE`). Returns `None` for symbols that
/// have never been quoted; callers decide how stale or missing prices
/// affect the operation at hand.
pub trait QuoteSource: Send + Sync {
    /// Last traded price for the symbol, if one has been recorded.
    fn last_price(&self, symbol: &Symbol) -> Option<Decimal>;
}
