//! Option Greeks and pricing results
//!
//! Units follow the reporting convention used throughout the crate:
//! vega per 1 volatility point, theta per calendar day, rho per 1% rate move.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt per calendar day (time decay)
    pub theta: f64,
    /// Vega: dV/dσ per 1 volatility point
    pub vega: f64,
    /// Rho: dV/dr per 1% rate move
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale Greeks by a factor (e.g., for position size)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Add two Greeks (for strategies)
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .all(|g| g.is_finite())
    }
}

/// Price and Greeks of one option at one market state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Fair value of one unit
    pub price: f64,
    #[serde(flatten)]
    pub greeks: Greeks,
}

impl PricingResult {
    pub fn new(price: f64, greeks: Greeks) -> Self {
        Self { price, greeks }
    }

    /// No NaN or infinity in the price or any Greek
    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.greeks.is_finite()
    }
}

/// Anything that reports a price and Greeks: a single option or a strategy
pub trait Valuation {
    fn price(&self) -> f64;
    fn greeks(&self) -> Greeks;
}

impl Valuation for PricingResult {
    fn price(&self) -> f64 {
        self.price
    }

    fn greeks(&self) -> Greeks {
        self.greeks
    }
}

/// Greeks for a book of contracts, expressed in currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioGreeks {
    /// Net market value
    pub value: f64,
    /// Net delta in share equivalents
    pub delta_shares: f64,
    /// Net delta (dollar delta)
    pub delta_dollars: f64,
    /// Change in share-equivalent delta per $1 move
    pub gamma_shares: f64,
    /// Net theta (per day)
    pub theta_dollars: f64,
    /// Net vega (per 1 vol point)
    pub vega_dollars: f64,
    /// Net rho (per 1% rate move)
    pub rho_dollars: f64,
    /// Number of positions
    pub num_positions: usize,
}

impl PortfolioGreeks {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            delta_shares: 0.0,
            delta_dollars: 0.0,
            gamma_shares: 0.0,
            theta_dollars: 0.0,
            vega_dollars: 0.0,
            rho_dollars: 0.0,
            num_positions: 0,
        }
    }

    /// Add a position's per-unit result
    pub fn add_position(&mut self, result: &PricingResult, quantity: f64, multiplier: f64, spot: f64) {
        let size = quantity * multiplier;
        self.value += result.price * size;
        self.delta_shares += result.greeks.delta * size;
        self.delta_dollars += result.greeks.delta * size * spot;
        self.gamma_shares += result.greeks.gamma * size;
        self.theta_dollars += result.greeks.theta * size;
        self.vega_dollars += result.greeks.vega * size;
        self.rho_dollars += result.greeks.rho * size;
        self.num_positions += 1;
    }
}

impl Default for PortfolioGreeks {
    fn default() -> Self {
        Self::new()
    }
}
