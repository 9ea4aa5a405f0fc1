//! Static Instrument Directory (Driven Adapter)

use crate::application::ports::InstrumentSource;
use crate::domain::instrument::{known_profiles, profile_for, InstrumentProfile};
use crate::domain::shared::Symbol;

/// Instrument directory backed by the built-in index parameter table.
///
/// Unlisted symbols resolve to the documented defaults, so the
/// directory answers for any index a caller names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticInstrumentSource;

impl StaticInstrumentSource {
    /// Create the directory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Every index with explicitly listed parameters.
    #[must_use]
    pub fn known(&self) -> Vec<InstrumentProfile> {
        known_profiles()
    }
}

impl InstrumentSource for StaticInstrumentSource {
    fn profile(&self, symbol: &Symbol) -> InstrumentProfile {
        profile_for(symbol)
    }
}
