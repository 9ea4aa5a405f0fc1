//! Strategy Risk Summary
//!
//! Aggregates a leg book into net premium, payoff bounds, breakeven, and
//! risk-reward. Computation is total: any book state yields a summary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::book::LegBook;
use super::leg::Leg;

/// A payoff bound: a concrete amount or open-ended exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffBound {
    /// Bounded at the given amount.
    Limited(Decimal),
    /// No finite bound.
    Unlimited,
}

impl PayoffBound {
    /// Check whether the bound is open-ended.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// The bounded amount, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<Decimal> {
        match self {
            Self::Limited(amount) => Some(*amount),
            Self::Unlimited => None,
        }
    }
}

/// Risk-reward classification for a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskReward {
    /// Both bounds finite and loss positive: profit per unit of loss.
    Ratio(Decimal),
    /// Profit is unlimited.
    Unbounded,
    /// No meaningful ratio (loss unbounded or zero).
    Undefined,
}

/// Inputs resolved outside the book: contract size and the current ATM
/// anchor for breakeven estimates.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs {
    /// Units per contract.
    pub lot_size: u32,
    /// The ATM strike for the session's spot, when spot is known.
    pub atm_strike: Option<Decimal>,
}

/// Computed risk summary for a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySummary {
    net_premium: Decimal,
    max_profit: PayoffBound,
    max_loss: PayoffBound,
    breakeven: Option<Decimal>,
    strike_span: Option<Decimal>,
    risk_reward: RiskReward,
    total_lots: u32,
    leg_count: usize,
}

impl StrategySummary {
    /// Compute the summary for a book.
    ///
    /// Never fails: an empty book yields zeros, and estimates that need
    /// data the book cannot provide (breakeven without an ATM anchor,
    /// ratio against an unbounded loss) degrade to `None` or
    /// [`RiskReward::Undefined`].
    #[must_use]
    pub fn compute(book: &LegBook, inputs: SummaryInputs) -> Self {
        if book.is_empty() {
            return Self::empty();
        }

        let lot_size = Decimal::from(inputs.lot_size);
        let net_premium: Decimal = book
            .legs()
            .iter()
            .map(|leg| leg.premium_flow(inputs.lot_size))
            .sum();

        let sell_lots: u32 = book
            .legs()
            .iter()
            .filter(|leg| leg.action().is_sell())
            .map(Leg::lots)
            .sum();
        let buy_lots: u32 = book
            .legs()
            .iter()
            .filter(|leg| leg.action().is_buy())
            .map(Leg::lots)
            .sum();

        let (max_profit, max_loss, strike_span) = if buy_lots == 0 {
            // Pure premium collection: profit capped at the credit, loss open.
            (
                PayoffBound::Limited(net_premium),
                PayoffBound::Unlimited,
                None,
            )
        } else if sell_lots == 0 {
            // Pure premium outlay: loss capped at the debit, profit open.
            (
                PayoffBound::Unlimited,
                PayoffBound::Limited(net_premium.abs()),
                None,
            )
        } else {
            let span = strike_span(book.legs(), lot_size, sell_lots.min(buy_lots));
            let (profit, loss) = spread_bounds(net_premium, span);
            (profit, loss, Some(span))
        };

        let breakeven = breakeven(
            book.legs(),
            inputs.atm_strike,
            lot_size,
            sell_lots,
            buy_lots,
            net_premium,
        );

        Self {
            net_premium,
            max_profit,
            max_loss,
            breakeven,
            strike_span,
            risk_reward: risk_reward(max_profit, max_loss),
            total_lots: sell_lots + buy_lots,
            leg_count: book.len(),
        }
    }

    fn empty() -> Self {
        Self {
            net_premium: Decimal::ZERO,
            max_profit: PayoffBound::Limited(Decimal::ZERO),
            max_loss: PayoffBound::Limited(Decimal::ZERO),
            breakeven: None,
            strike_span: None,
            risk_reward: RiskReward::Undefined,
            total_lots: 0,
            leg_count: 0,
        }
    }

    /// Net premium: positive for a credit, negative for a debit.
    #[must_use]
    pub const fn net_premium(&self) -> Decimal {
        self.net_premium
    }

    /// Maximum profit bound.
    #[must_use]
    pub const fn max_profit(&self) -> PayoffBound {
        self.max_profit
    }

    /// Maximum loss bound.
    #[must_use]
    pub const fn max_loss(&self) -> PayoffBound {
        self.max_loss
    }

    /// Breakeven estimate, when the book shape supports one.
    #[must_use]
    pub const fn breakeven(&self) -> Option<Decimal> {
        self.breakeven
    }

    /// Strike span in premium terms, for mixed books.
    #[must_use]
    pub const fn strike_span(&self) -> Option<Decimal> {
        self.strike_span
    }

    /// Risk-reward classification.
    #[must_use]
    pub const fn risk_reward(&self) -> RiskReward {
        self.risk_reward
    }

    /// Lots summed across every leg.
    #[must_use]
    pub const fn total_lots(&self) -> u32 {
        self.total_lots
    }

    /// Number of legs summarised.
    #[must_use]
    pub const fn leg_count(&self) -> usize {
        self.leg_count
    }
}

/// Distance between the outermost strikes, scaled by lot size and the
/// lots actually paired across the two sides.
fn strike_span(legs: &[Leg], lot_size: Decimal, paired_lots: u32) -> Decimal {
    let (min_strike, max_strike) = legs.iter().fold(
        (Decimal::MAX, Decimal::MIN),
        |(lo, hi), leg| (lo.min(leg.strike()), hi.max(leg.strike())),
    );
    (max_strike - min_strike) * lot_size * Decimal::from(paired_lots)
}

/// Payoff bounds for a mixed book.
fn spread_bounds(net_premium: Decimal, span: Decimal) -> (PayoffBound, PayoffBound) {
    if net_premium > Decimal::ZERO {
        let loss = if span > Decimal::ZERO {
            span - net_premium
        } else {
            // All legs share one strike, so the spread has no width to cap
            // the loss. Estimate at a multiple of the credit.
            net_premium * dec!(3)
        };
        (PayoffBound::Limited(net_premium), PayoffBound::Limited(loss))
    } else {
        let loss = net_premium.abs();
        let profit = if span > Decimal::ZERO {
            span - loss
        } else {
            loss * Decimal::TWO
        };
        (PayoffBound::Limited(profit), PayoffBound::Limited(loss))
    }
}

/// Breakeven estimate anchored at the ATM strike.
///
/// Only two book shapes support one: a single leg, and a two-leg book
/// with one side bought and one sold. A single leg breaks even one
/// premium per unit above the anchor on either side: the credit
/// collected for a short, the debit at risk for a long.
fn breakeven(
    legs: &[Leg],
    atm_strike: Option<Decimal>,
    lot_size: Decimal,
    sell_lots: u32,
    buy_lots: u32,
    net_premium: Decimal,
) -> Option<Decimal> {
    let atm = atm_strike?;
    let mixed = sell_lots > 0 && buy_lots > 0;

    match legs {
        [leg] => {
            let units = Decimal::from(leg.lots()) * lot_size;
            (units > Decimal::ZERO).then(|| atm + net_premium.abs() / units)
        }
        [_, _] if mixed => {
            let units = Decimal::from(sell_lots + buy_lots) * lot_size / Decimal::TWO;
            (units > Decimal::ZERO).then(|| atm + net_premium / units)
        }
        _ => None,
    }
}

fn risk_reward(max_profit: PayoffBound, max_loss: PayoffBound) -> RiskReward {
    match (max_profit, max_loss) {
        (PayoffBound::Unlimited, _) => RiskReward::Unbounded,
        (PayoffBound::Limited(profit), PayoffBound::Limited(loss)) if loss > Decimal::ZERO => {
            RiskReward::Ratio(profit / loss)
        }
        _ => RiskReward::Undefined,
    }
}
