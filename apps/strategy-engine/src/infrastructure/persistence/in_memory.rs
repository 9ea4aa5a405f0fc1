//! In-memory watchlist store.

use std::sync::RwLock;

use crate::domain::shared::Symbol;

/// Watchlist of index symbols, kept in memory.
///
/// Insertion order is preserved and duplicates are rejected.
#[derive(Debug, Default)]
pub struct InMemoryWatchlist {
    symbols: RwLock<Vec<Symbol>>,
}

impl InMemoryWatchlist {
    /// Create an empty watchlist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: RwLock::new(Vec::new()),
        }
    }

    /// Add a symbol. Returns `false` when it is already listed.
    pub fn add(&self, symbol: Symbol) -> bool {
        let mut symbols = self
            .symbols
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if symbols.contains(&symbol) {
            return false;
        }
        symbols.push(symbol);
        true
    }

    /// Remove a symbol. Returns whether it was present.
    pub fn remove(&self, symbol: &Symbol) -> bool {
        let mut symbols = self
            .symbols
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = symbols.len();
        symbols.retain(|listed| listed != symbol);
        symbols.len() < before
    }

    /// Drop every symbol.
    pub fn clear(&self) {
        self.symbols
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Symbols in insertion order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.symbols
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of listed symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the watchlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
