//! Simulation settings shared by every analysis run

use serde::{Deserialize, Serialize};

use crate::core::{BsmError, BsmResult};
use crate::sweep::SweepParams;

/// Resolution and ranges for the three sweeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Points on the time-decay axis
    /// Default: 20
    pub time_points: usize,
    /// Underlying-price sweep, relative to spot
    pub price_scenarios: PriceScenarioSettings,
    /// Volatility sweep, absolute
    pub volatility_scenarios: VolatilityScenarioSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            time_points: 20,
            price_scenarios: PriceScenarioSettings::default(),
            volatility_scenarios: VolatilityScenarioSettings::default(),
        }
    }
}

impl SimulationSettings {
    /// Coarse grids for a quick look
    pub fn quick() -> Self {
        Self {
            time_points: 8,
            price_scenarios: PriceScenarioSettings {
                num_points: 11,
                ..Default::default()
            },
            volatility_scenarios: VolatilityScenarioSettings {
                num_points: 5,
                ..Default::default()
            },
        }
    }

    /// Fine grids for charts
    pub fn detailed() -> Self {
        Self {
            time_points: 60,
            price_scenarios: PriceScenarioSettings {
                num_points: 121,
                ..Default::default()
            },
            volatility_scenarios: VolatilityScenarioSettings {
                num_points: 36,
                ..Default::default()
            },
        }
    }

    pub fn validate(&self) -> BsmResult<()> {
        if self.time_points < 2 {
            return Err(BsmError::config("time_points must be at least 2"));
        }

        let p = &self.price_scenarios;
        if !(p.min_percentage > 0.0 && p.min_percentage < p.max_percentage && p.max_percentage.is_finite()) {
            return Err(BsmError::config(format!(
                "price_scenarios needs 0 < min_percentage < max_percentage, got {} and {}",
                p.min_percentage, p.max_percentage
            )));
        }
        if p.num_points < 2 {
            return Err(BsmError::config("price_scenarios.num_points must be at least 2"));
        }

        let v = &self.volatility_scenarios;
        if !(v.min_vol >= 0.0 && v.min_vol < v.max_vol && v.max_vol.is_finite()) {
            return Err(BsmError::config(format!(
                "volatility_scenarios needs 0 <= min_vol < max_vol, got {} and {}",
                v.min_vol, v.max_vol
            )));
        }
        if v.num_points < 2 {
            return Err(BsmError::config("volatility_scenarios.num_points must be at least 2"));
        }

        Ok(())
    }

    /// Absolute price range around `spot`
    pub fn price_range(&self, spot: f64) -> (f64, f64) {
        (
            spot * self.price_scenarios.min_percentage,
            spot * self.price_scenarios.max_percentage,
        )
    }

    pub fn time_params(&self) -> SweepParams {
        SweepParams::Time {
            time_points: self.time_points,
        }
    }

    pub fn price_params(&self, spot: f64) -> SweepParams {
        SweepParams::Price {
            range: self.price_range(spot),
            num_prices: self.price_scenarios.num_points,
        }
    }

    pub fn volatility_params(&self) -> SweepParams {
        SweepParams::Volatility {
            range: (self.volatility_scenarios.min_vol, self.volatility_scenarios.max_vol),
            num_vols: self.volatility_scenarios.num_points,
        }
    }
}

/// Price sweep bounds as fractions of spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceScenarioSettings {
    /// Default: 0.7
    pub min_percentage: f64,
    /// Default: 1.3
    pub max_percentage: f64,
    /// Default: 25
    pub num_points: usize,
}

impl Default for PriceScenarioSettings {
    fn default() -> Self {
        Self {
            min_percentage: 0.7,
            max_percentage: 1.3,
            num_points: 25,
        }
    }
}

/// Volatility sweep bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityScenarioSettings {
    /// Default: 0.1
    pub min_vol: f64,
    /// Default: 0.8
    pub max_vol: f64,
    /// Default: 10
    pub num_points: usize,
}

impl Default for VolatilityScenarioSettings {
    fn default() -> Self {
        Self {
            min_vol: 0.1,
            max_vol: 0.8,
            num_points: 10,
        }
    }
}
