//! What a sweep can be run over
//!
//! A sweep only needs to re-price its target under a modified market state.
//! Single options and multi-leg strategies both provide that through
//! [`SweepTarget`], so every sweep kind works with either.

use crate::core::{BsmResult, OptionSpec, PricingResult, Valuation};
use crate::models::black_scholes::evaluate;
use crate::strategy::{aggregate, Strategy, StrategyResult};

/// Market-state overrides applied to every leg of a target
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scenario {
    /// Replaces the underlying price
    pub underlying_price: Option<f64>,
    /// Replaces the volatility
    pub volatility: Option<f64>,
    /// Remaining time of the longest-dated leg; other legs age by the same amount
    pub remaining_time: Option<f64>,
}

impl Scenario {
    pub fn at_price(underlying_price: f64) -> Self {
        Self {
            underlying_price: Some(underlying_price),
            ..Default::default()
        }
    }

    pub fn at_volatility(volatility: f64) -> Self {
        Self {
            volatility: Some(volatility),
            ..Default::default()
        }
    }

    pub fn at_remaining(remaining_time: f64) -> Self {
        Self {
            remaining_time: Some(remaining_time),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, underlying_price: f64) -> Self {
        self.underlying_price = Some(underlying_price);
        self
    }

    /// Copy of `spec` under this scenario; `horizon` is the target's longest time
    pub fn apply(&self, spec: &OptionSpec, horizon: f64) -> OptionSpec {
        let mut shifted = spec.clone();
        if let Some(s) = self.underlying_price {
            shifted.underlying_price = s;
        }
        if let Some(v) = self.volatility {
            shifted.volatility = v;
        }
        if let Some(t) = self.remaining_time {
            shifted.time_to_expiration = if spec.time_to_expiration == horizon {
                t
            } else {
                spec.time_to_expiration - (horizon - t)
            };
        }
        shifted
    }
}

/// A single option or a strategy that sweeps can re-price
pub trait SweepTarget: Sync {
    type Output: Valuation + Clone + Send;

    /// Price and Greeks under `scenario`
    fn evaluate_scenario(&self, scenario: &Scenario) -> BsmResult<Self::Output>;

    /// Quantity-weighted intrinsic value under `scenario`
    fn intrinsic_scenario(&self, scenario: &Scenario) -> f64;

    /// Time to expiration of the longest-dated leg
    fn horizon(&self) -> f64;

    /// Underlying price of the first leg
    fn reference_price(&self) -> f64;
}

impl SweepTarget for OptionSpec {
    type Output = PricingResult;

    fn evaluate_scenario(&self, scenario: &Scenario) -> BsmResult<PricingResult> {
        evaluate(&scenario.apply(self, self.time_to_expiration))
    }

    fn intrinsic_scenario(&self, scenario: &Scenario) -> f64 {
        scenario.apply(self, self.time_to_expiration).intrinsic_value()
    }

    fn horizon(&self) -> f64 {
        self.time_to_expiration
    }

    fn reference_price(&self) -> f64 {
        self.underlying_price
    }
}

impl SweepTarget for [OptionSpec] {
    type Output = StrategyResult;

    fn evaluate_scenario(&self, scenario: &Scenario) -> BsmResult<StrategyResult> {
        let horizon = self.horizon();
        let legs: Vec<OptionSpec> = self.iter().map(|l| scenario.apply(l, horizon)).collect();
        aggregate(&legs)
    }

    fn intrinsic_scenario(&self, scenario: &Scenario) -> f64 {
        let horizon = self.horizon();
        self.iter()
            .map(|l| l.quantity * scenario.apply(l, horizon).intrinsic_value())
            .sum()
    }

    fn horizon(&self) -> f64 {
        self.iter()
            .map(|l| l.time_to_expiration)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn reference_price(&self) -> f64 {
        self.first().map(|l| l.underlying_price).unwrap_or(f64::NAN)
    }
}

impl SweepTarget for Vec<OptionSpec> {
    type Output = StrategyResult;

    fn evaluate_scenario(&self, scenario: &Scenario) -> BsmResult<StrategyResult> {
        self.as_slice().evaluate_scenario(scenario)
    }

    fn intrinsic_scenario(&self, scenario: &Scenario) -> f64 {
        self.as_slice().intrinsic_scenario(scenario)
    }

    fn horizon(&self) -> f64 {
        self.as_slice().horizon()
    }

    fn reference_price(&self) -> f64 {
        self.as_slice().reference_price()
    }
}

impl SweepTarget for Strategy {
    type Output = StrategyResult;

    fn evaluate_scenario(&self, scenario: &Scenario) -> BsmResult<StrategyResult> {
        self.legs.as_slice().evaluate_scenario(scenario)
    }

    fn intrinsic_scenario(&self, scenario: &Scenario) -> f64 {
        self.legs.as_slice().intrinsic_scenario(scenario)
    }

    fn horizon(&self) -> f64 {
        self.legs.as_slice().horizon()
    }

    fn reference_price(&self) -> f64 {
        self.legs.as_slice().reference_price()
    }
}
