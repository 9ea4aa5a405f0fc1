//! Instrument Source (Driven Port)

use crate::domain::instrument::InstrumentProfile;
use crate::domain::shared::Symbol;

/// Resolves contract parameters for an index.
///
/// Total by contract: unknown symbols resolve to a profile built from
/// the documented defaults rather than an error, so a session can be
/// opened on any index the caller names.
pub trait InstrumentSource: Send + Sync {
    /// Contract parameters for the given index symbol.
    fn profile(&self, symbol: &Symbol) -> InstrumentProfile;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::profile_for;

    struct TableLookup;

    impl InstrumentSource for TableLookup {
        fn profile(&self, symbol: &Symbol) -> InstrumentProfile {
            profile_for(symbol)
        }
    }

    #[test]
    fn port_is_object_safe() {
        let source: Box<dyn InstrumentSource> = Box::new(TableLookup);
        let profile = source.profile(&Symbol::new("BANKNIFTY"));

        assert_eq!(profile.lot_size(), 15);
    }
}
