//! Multi-leg strategies
//!
//! A strategy is an ordered list of option legs on one underlying. Each leg is
//! priced independently and the results are combined linearly, weighted by the
//! leg's signed quantity:
//!
//! price = Σ quantity_i · price_i, greek = Σ quantity_i · greek_i
//!
//! The aggregate price is the net premium: positive is a net debit (paid to
//! open), negative a net credit (received).

mod builders;

pub use builders::*;

use serde::{Deserialize, Serialize};

use crate::core::{BsmError, BsmResult, Greeks, OptionSpec, PortfolioGreeks, PricingResult, Valuation};
use crate::models::black_scholes::evaluate;

/// Aggregate price and Greeks of a strategy, plus per-leg unit results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Net premium (positive = debit, negative = credit)
    pub price: f64,
    #[serde(flatten)]
    pub greeks: Greeks,
    /// Per-unit results, in leg order
    pub legs: Vec<PricingResult>,
}

impl StrategyResult {
    pub fn is_net_debit(&self) -> bool {
        self.price > 0.0
    }

    pub fn is_net_credit(&self) -> bool {
        self.price < 0.0
    }
}

impl Valuation for StrategyResult {
    fn price(&self) -> f64 {
        self.price
    }

    fn greeks(&self) -> Greeks {
        self.greeks
    }
}

/// Price every leg and combine them by quantity.
///
/// Fails with [`BsmError::EmptyStrategy`] for zero legs, with
/// [`BsmError::InvalidInput`] when any leg or its quantity is invalid, and with
/// [`BsmError::MixedUnderlying`] when legs name different underlyings.
pub fn aggregate(legs: &[OptionSpec]) -> BsmResult<StrategyResult> {
    if legs.is_empty() {
        return Err(BsmError::EmptyStrategy);
    }
    check_underlyings(legs)?;

    tracing::debug!(legs = legs.len(), "aggregating strategy");

    let mut price = 0.0;
    let mut greeks = Greeks::default();
    let mut results = Vec::with_capacity(legs.len());

    for leg in legs {
        if !leg.quantity.is_finite() {
            return Err(BsmError::invalid_input(format!(
                "leg quantity must be finite, got {}",
                leg.quantity
            )));
        }
        let result = evaluate(leg)?;
        price += leg.quantity * result.price;
        greeks = greeks.add(&result.greeks.scale(leg.quantity));
        results.push(result);
    }

    Ok(StrategyResult {
        price,
        greeks,
        legs: results,
    })
}

/// Legs must agree on the underlying symbol; differing spot prices only warn
fn check_underlyings(legs: &[OptionSpec]) -> BsmResult<()> {
    let mut symbol: Option<&str> = None;
    for leg in legs {
        if let Some(other) = leg.underlying.as_deref() {
            match symbol {
                Some(first) if first != other => {
                    return Err(BsmError::MixedUnderlying {
                        first: first.to_string(),
                        other: other.to_string(),
                    });
                }
                None => symbol = Some(other),
                _ => {}
            }
        }
    }

    let spot = legs[0].underlying_price;
    if legs.iter().any(|l| (l.underlying_price - spot).abs() > 1e-9 * spot.abs()) {
        tracing::warn!(
            reference_spot = spot,
            "strategy legs carry different underlying prices"
        );
    }

    Ok(())
}

/// Ordered collection of option legs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Legs in display order
    pub legs: Vec<OptionSpec>,
}

impl Strategy {
    pub fn new(legs: Vec<OptionSpec>) -> Self {
        Self { name: None, legs }
    }

    pub fn named(name: impl Into<String>, legs: Vec<OptionSpec>) -> Self {
        Self {
            name: Some(name.into()),
            legs,
        }
    }

    /// Append a leg
    pub fn push(&mut self, leg: OptionSpec) {
        self.legs.push(leg);
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Aggregate price and Greeks
    pub fn evaluate(&self) -> BsmResult<StrategyResult> {
        aggregate(&self.legs)
    }

    /// Quantity-weighted intrinsic value at the legs' current underlying price
    pub fn intrinsic_value(&self) -> f64 {
        self.legs.iter().map(|l| l.quantity * l.intrinsic_value()).sum()
    }

    /// Time to expiration of the longest-dated leg
    pub fn horizon(&self) -> f64 {
        self.legs
            .iter()
            .map(|l| l.time_to_expiration)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Book-level exposure for contracts of the given multiplier (e.g., 100)
    pub fn exposure(&self, multiplier: f64) -> BsmResult<PortfolioGreeks> {
        let result = self.evaluate()?;
        let mut book = PortfolioGreeks::new();
        for (leg, unit) in self.legs.iter().zip(&result.legs) {
            book.add_position(unit, leg.quantity, multiplier, leg.underlying_price);
        }
        Ok(book)
    }
}
