//! Manual Quote Board (Driven Adapter)

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use crate::application::ports::QuoteSource;
use crate::domain::shared::Symbol;

/// Quote store fed by pushes over the API.
///
/// Holds the last traded price per symbol, for index names and full
/// contract trading symbols alike. Non-positive prices are rejected at
/// the door so readers never see them.
#[derive(Debug, Default)]
pub struct ManualQuoteBoard {
    prices: RwLock<HashMap<Symbol, Decimal>>,
}

impl ManualQuoteBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
        }
    }

    /// Record the last traded price for a symbol.
    ///
    /// Returns whether the quote was accepted; zero and negative prices
    /// are dropped.
    pub fn set(&self, symbol: Symbol, price: Decimal) -> bool {
        if price <= Decimal::ZERO {
            return false;
        }
        self.prices
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(symbol, price);
        true
    }

    /// Record a batch of quotes. Returns how many were accepted.
    pub fn set_all<T>(&self, quotes: T) -> usize
    where
        T: IntoIterator<Item = (Symbol, Decimal)>,
    {
        let mut accepted = 0;
        for (symbol, price) in quotes {
            if self.set(symbol, price) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Number of symbols with a recorded price.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether no price has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuoteSource for ManualQuoteBoard {
    fn last_price(&self, symbol: &Symbol) -> Option<Decimal> {
        self.prices
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(symbol)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn set_then_read_back() {
        let board = ManualQuoteBoard::new();

        assert!(board.set(Symbol::new("NIFTY"), dec!(22450.35)));

        assert_eq!(
            board.last_price(&Symbol::new("NIFTY")),
            Some(dec!(22450.35))
        );
    }

    #[test]
    fn unknown_symbol_has_no_price() {
        let board = ManualQuoteBoard::new();

        assert_eq!(board.last_price(&Symbol::new("FINNIFTY")), None);
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        let board = ManualQuoteBoard::new();

        assert!(!board.set(Symbol::new("NIFTY"), Decimal::ZERO));
        assert!(!board.set(Symbol::new("NIFTY"), dec!(-5)));
        assert!(board.is_empty());
    }

    #[test]
    fn latest_quote_wins() {
        let board = ManualQuoteBoard::new();
        board.set(Symbol::new("SENSEX"), dec!(74000));

        board.set(Symbol::new("SENSEX"), dec!(74125.50));

        assert_eq!(
            board.last_price(&Symbol::new("SENSEX")),
            Some(dec!(74125.50))
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn set_all_counts_only_accepted() {
        let board = ManualQuoteBoard::new();

        let accepted = board.set_all([
            (Symbol::new("NIFTY"), dec!(22450)),
            (Symbol::new("BANKNIFTY"), dec!(0)),
            (Symbol::new("NIFTY26JAN2922450CE"), dec!(101.25)),
        ]);

        assert_eq!(accepted, 2);
        assert_eq!(board.len(), 2);
    }
}
