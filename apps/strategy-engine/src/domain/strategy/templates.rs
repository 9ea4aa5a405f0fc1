//! Strategy Templates
//!
//! Predefined multi-leg layouts expressed as blueprints relative to the
//! at-the-money strike. Template legs start with one lot and zero premium;
//! entry premiums are filled in afterwards from live quotes.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::StrategyError;
use super::leg::{Leg, LegAction, LegDraft};
use super::strike::{resolve_strike, StrikeSelector};
use crate::domain::instrument::ContractKind;
use crate::domain::shared::Symbol;

/// One leg of a template layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegBlueprint {
    /// Buy or sell.
    pub action: LegAction,
    /// Call or put.
    pub kind: ContractKind,
    /// Strike relative to ATM.
    pub selector: StrikeSelector,
}

const fn blueprint(action: LegAction, kind: ContractKind, selector: StrikeSelector) -> LegBlueprint {
    LegBlueprint {
        action,
        kind,
        selector,
    }
}

const STRADDLE: [LegBlueprint; 2] = [
    blueprint(LegAction::Sell, ContractKind::Call, StrikeSelector::Atm),
    blueprint(LegAction::Sell, ContractKind::Put, StrikeSelector::Atm),
];

const STRANGLE: [LegBlueprint; 2] = [
    blueprint(
        LegAction::Sell,
        ContractKind::Call,
        StrikeSelector::Otm { steps: 1 },
    ),
    blueprint(
        LegAction::Sell,
        ContractKind::Put,
        StrikeSelector::Itm { steps: 1 },
    ),
];

const BULL_CALL: [LegBlueprint; 2] = [
    blueprint(LegAction::Buy, ContractKind::Call, StrikeSelector::Atm),
    blueprint(
        LegAction::Sell,
        ContractKind::Call,
        StrikeSelector::Otm { steps: 2 },
    ),
];

const BEAR_PUT: [LegBlueprint; 2] = [
    blueprint(LegAction::Buy, ContractKind::Put, StrikeSelector::Atm),
    blueprint(
        LegAction::Sell,
        ContractKind::Put,
        StrikeSelector::Itm { steps: 2 },
    ),
];

const IRON_FLY: [LegBlueprint; 4] = [
    blueprint(LegAction::Sell, ContractKind::Call, StrikeSelector::Atm),
    blueprint(LegAction::Sell, ContractKind::Put, StrikeSelector::Atm),
    blueprint(
        LegAction::Buy,
        ContractKind::Call,
        StrikeSelector::Otm { steps: 2 },
    ),
    blueprint(
        LegAction::Buy,
        ContractKind::Put,
        StrikeSelector::Itm { steps: 2 },
    ),
];

const IRON_CONDOR: [LegBlueprint; 4] = [
    blueprint(
        LegAction::Sell,
        ContractKind::Call,
        StrikeSelector::Otm { steps: 1 },
    ),
    blueprint(
        LegAction::Sell,
        ContractKind::Put,
        StrikeSelector::Itm { steps: 1 },
    ),
    blueprint(
        LegAction::Buy,
        ContractKind::Call,
        StrikeSelector::Otm { steps: 3 },
    ),
    blueprint(
        LegAction::Buy,
        ContractKind::Put,
        StrikeSelector::Itm { steps: 3 },
    ),
];

/// Supported strategy templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTemplate {
    /// Sell call and put at the money.
    Straddle,
    /// Sell call above and put below the money.
    Strangle,
    /// Buy call at the money, sell call two strikes up.
    BullCall,
    /// Buy put at the money, sell put two strikes down.
    BearPut,
    /// Straddle with bought wings two strikes out.
    IronFly,
    /// Strangle with bought wings three strikes out.
    IronCondor,
}

impl StrategyTemplate {
    /// Every supported template, in display order.
    pub const ALL: [Self; 6] = [
        Self::Straddle,
        Self::Strangle,
        Self::BullCall,
        Self::BearPut,
        Self::IronFly,
        Self::IronCondor,
    ];

    /// The leg layout for this template.
    #[must_use]
    pub const fn blueprint(self) -> &'static [LegBlueprint] {
        match self {
            Self::Straddle => &STRADDLE,
            Self::Strangle => &STRANGLE,
            Self::BullCall => &BULL_CALL,
            Self::BearPut => &BEAR_PUT,
            Self::IronFly => &IRON_FLY,
            Self::IronCondor => &IRON_CONDOR,
        }
    }

    /// Wire name of the template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Straddle => "straddle",
            Self::Strangle => "strangle",
            Self::BullCall => "bull_call",
            Self::BearPut => "bear_put",
            Self::IronFly => "iron_fly",
            Self::IronCondor => "iron_condor",
        }
    }
}

impl std::fmt::Display for StrategyTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyTemplate {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "straddle" => Ok(Self::Straddle),
            "strangle" => Ok(Self::Strangle),
            "bull_call" => Ok(Self::BullCall),
            "bear_put" => Ok(Self::BearPut),
            "iron_fly" => Ok(Self::IronFly),
            "iron_condor" => Ok(Self::IronCondor),
            _ => Err(StrategyError::UnknownTemplate {
                name: s.to_string(),
            }),
        }
    }
}

/// Build the legs for a template against the current spot price.
///
/// Every strike is resolved before any leg is constructed, so a failure
/// leaves nothing half-built. Legs come out with one lot and zero entry
/// premium.
///
/// # Errors
///
/// Returns [`StrategyError::MissingSpotPrice`] when spot is absent or
/// non-positive, since every template layout is spot-relative.
pub fn build_template_legs(
    template: StrategyTemplate,
    spot: Option<Decimal>,
    increment: Decimal,
    symbol: &Symbol,
) -> Result<Vec<Leg>, StrategyError> {
    template
        .blueprint()
        .iter()
        .map(|piece| {
            let strike = resolve_strike(piece.selector, spot, increment, symbol)?;
            Leg::new(
                LegDraft {
                    action: piece.action,
                    kind: piece.kind,
                    selector: piece.selector,
                    lots: 1,
                    entry_premium: Decimal::ZERO,
                },
                strike,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn nifty() -> Symbol {
        Symbol::new("NIFTY")
    }

    #[test_case(
        StrategyTemplate::Straddle,
        &[
            (LegAction::Sell, ContractKind::Call, 22450),
            (LegAction::Sell, ContractKind::Put, 22450),
        ];
        "straddle sells both at the money"
    )]
    #[test_case(
        StrategyTemplate::Strangle,
        &[
            (LegAction::Sell, ContractKind::Call, 22500),
            (LegAction::Sell, ContractKind::Put, 22400),
        ];
        "strangle sells one strike out"
    )]
    #[test_case(
        StrategyTemplate::BullCall,
        &[
            (LegAction::Buy, ContractKind::Call, 22450),
            (LegAction::Sell, ContractKind::Call, 22550),
        ];
        "bull call buys atm sells two up"
    )]
    #[test_case(
        StrategyTemplate::BearPut,
        &[
            (LegAction::Buy, ContractKind::Put, 22450),
            (LegAction::Sell, ContractKind::Put, 22350),
        ];
        "bear put buys atm sells two down"
    )]
    #[test_case(
        StrategyTemplate::IronFly,
        &[
            (LegAction::Sell, ContractKind::Call, 22450),
            (LegAction::Sell, ContractKind::Put, 22450),
            (LegAction::Buy, ContractKind::Call, 22550),
            (LegAction::Buy, ContractKind::Put, 22350),
        ];
        "iron fly wings two strikes out"
    )]
    #[test_case(
        StrategyTemplate::IronCondor,
        &[
            (LegAction::Sell, ContractKind::Call, 22500),
            (LegAction::Sell, ContractKind::Put, 22400),
            (LegAction::Buy, ContractKind::Call, 22600),
            (LegAction::Buy, ContractKind::Put, 22300),
        ];
        "iron condor wings three strikes out"
    )]
    fn template_layout(template: StrategyTemplate, expected: &[(LegAction, ContractKind, i64)]) {
        let legs = build_template_legs(template, Some(dec!(22450)), dec!(50), &nifty()).unwrap();

        assert_eq!(legs.len(), expected.len());
        for (leg, (action, kind, strike)) in legs.iter().zip(expected) {
            assert_eq!(leg.action(), *action);
            assert_eq!(leg.kind(), *kind);
            assert_eq!(leg.strike(), Decimal::from(*strike));
            assert_eq!(leg.lots(), 1);
            assert_eq!(leg.entry_premium(), dec!(0));
        }
    }

    #[test]
    fn template_build_requires_spot() {
        for template in StrategyTemplate::ALL {
            let err = build_template_legs(template, None, dec!(50), &nifty()).unwrap_err();
            assert!(matches!(err, StrategyError::MissingSpotPrice { .. }), "{template}");
        }
    }

    #[test]
    fn template_names_roundtrip() {
        for template in StrategyTemplate::ALL {
            let parsed: StrategyTemplate = template.as_str().parse().unwrap();
            assert_eq!(parsed, template);
        }
    }

    #[test]
    fn template_parse_is_case_insensitive() {
        let parsed: StrategyTemplate = "IRON_CONDOR".parse().unwrap();
        assert_eq!(parsed, StrategyTemplate::IronCondor);
    }

    #[test]
    fn template_parse_rejects_unknown() {
        let err = "calendar".parse::<StrategyTemplate>().unwrap_err();
        assert_eq!(
            err,
            StrategyError::UnknownTemplate {
                name: "calendar".to_string(),
            }
        );
    }

    #[test]
    fn template_serde_names() {
        let json = serde_json::to_string(&StrategyTemplate::BullCall).unwrap();
        assert_eq!(json, "\"bull_call\"");

        let parsed: StrategyTemplate = serde_json::from_str("\"iron_fly\"").unwrap();
        assert_eq!(parsed, StrategyTemplate::IronFly);
    }

    #[test]
    fn strangle_offsets_scale_with_increment() {
        let legs = build_template_legs(
            StrategyTemplate::Strangle,
            Some(dec!(48123)),
            dec!(100),
            &Symbol::new("BANKNIFTY"),
        )
        .unwrap();

        assert_eq!(legs[0].strike(), dec!(48200));
        assert_eq!(legs[1].strike(), dec!(48000));
    }
}
