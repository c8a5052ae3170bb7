//! Parameter sweeps
//!
//! Three sweep kinds share one shape: build an ordered axis, re-price the
//! target at every point, assemble one [`SweepRecord`] per point.
//!
//! - **Time decay**: remaining time from T0 down to 0, other inputs frozen
//! - **Price scenario**: underlying price from low to high
//! - **Volatility**: volatility from low to high
//!
//! Targets are a single [`OptionSpec`](crate::core::OptionSpec) (records carry
//! a [`PricingResult`](crate::core::PricingResult)) or a list of legs /
//! [`Strategy`](crate::strategy::Strategy) (records carry a
//! [`StrategyResult`](crate::strategy::StrategyResult)).
//!
//! Every record also carries the P&L against the unshifted target, intrinsic
//! value and time value. Large sweeps evaluate their points on the rayon pool;
//! output order always follows the axis.

mod grid;
mod scenarios;
mod target;
mod time_decay;

pub use grid::*;
pub use scenarios::*;
pub use target::*;
pub use time_decay::*;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{BsmError, BsmResult, Valuation, REPORTING_DAYS_PER_YEAR};

/// Sweeps with at least this many points are evaluated in parallel
pub const PARALLEL_THRESHOLD: usize = 64;

/// Which model input a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepKind {
    Time,
    Price,
    Volatility,
}

/// Sweep-kind specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepParams {
    /// `time_points` values of remaining time from T0 down to 0
    Time { time_points: usize },
    /// `num_prices` underlying prices from `range.0` to `range.1`
    Price { range: (f64, f64), num_prices: usize },
    /// `num_vols` volatilities from `range.0` to `range.1`
    Volatility { range: (f64, f64), num_vols: usize },
}

impl SweepParams {
    pub fn kind(&self) -> SweepKind {
        match self {
            SweepParams::Time { .. } => SweepKind::Time,
            SweepParams::Price { .. } => SweepKind::Price,
            SweepParams::Volatility { .. } => SweepKind::Volatility,
        }
    }

    /// 70%-130% of spot over 25 points
    pub fn price_default(spot: f64) -> Self {
        SweepParams::Price {
            range: (spot * 0.7, spot * 1.3),
            num_prices: 25,
        }
    }

    /// 10%-80% volatility over 10 points
    pub fn volatility_default() -> Self {
        SweepParams::Volatility {
            range: (0.1, 0.8),
            num_vols: 10,
        }
    }
}

/// One row of a sweep table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord<O> {
    /// Value of the swept input (years, price, or volatility)
    pub axis_value: f64,
    /// Remaining time of the longest-dated leg, in days
    pub days_to_expiration: f64,
    /// Quantity-weighted intrinsic value at this point
    pub intrinsic_value: f64,
    /// price - intrinsic_value
    pub time_value: f64,
    /// price - price of the unshifted target
    pub pnl: f64,
    #[serde(flatten)]
    pub result: O,
}

/// Ordered, fully materialized sweep output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable<O> {
    pub kind: SweepKind,
    /// Price of the unshifted target, the P&L reference
    pub base_price: f64,
    pub records: Vec<SweepRecord<O>>,
}

impl<O: Valuation> SweepTable<O> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepRecord<O>> {
        self.records.iter()
    }

    /// Axis values in output order
    pub fn axis_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.axis_value).collect()
    }

    /// Prices in output order
    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.result.price()).collect()
    }
}

impl<'a, O> IntoIterator for &'a SweepTable<O> {
    type Item = &'a SweepRecord<O>;
    type IntoIter = std::slice::Iter<'a, SweepRecord<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Run any sweep kind over any target
pub fn sweep<T: SweepTarget + ?Sized>(target: &T, params: &SweepParams) -> BsmResult<SweepTable<T::Output>> {
    match *params {
        SweepParams::Time { time_points } => time_decay(target, time_points),
        SweepParams::Price { range, num_prices } => price_scenarios(target, range, num_prices),
        SweepParams::Volatility { range, num_vols } => volatility_scenarios(target, range, num_vols),
    }
}

/// `n` evenly spaced values from `low` to `high`, both ends included exactly
pub fn linspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        high
                    } else {
                        low + (high - low) * (i as f64) / last
                    }
                })
                .collect()
        }
    }
}

pub(crate) fn validate_range(name: &str, (low, high): (f64, f64), n: usize) -> BsmResult<()> {
    if !low.is_finite() || !high.is_finite() {
        return Err(BsmError::invalid_range(format!(
            "{} range must be finite, got ({}, {})",
            name, low, high
        )));
    }
    if low >= high {
        return Err(BsmError::invalid_range(format!(
            "{} range low must be below high, got ({}, {})",
            name, low, high
        )));
    }
    validate_points(name, n)
}

pub(crate) fn validate_points(name: &str, n: usize) -> BsmResult<()> {
    if n < 2 {
        return Err(BsmError::invalid_range(format!(
            "{} sweep needs at least 2 points, got {}",
            name, n
        )));
    }
    Ok(())
}

/// Evaluate `target` at every axis point, in axis order
pub(crate) fn run<T, F, D>(
    target: &T,
    kind: SweepKind,
    axis: Vec<f64>,
    scenario_at: F,
    days_at: D,
) -> BsmResult<SweepTable<T::Output>>
where
    T: SweepTarget + ?Sized,
    F: Fn(f64) -> Scenario + Sync,
    D: Fn(f64) -> f64 + Sync,
{
    let base_price = target.evaluate_scenario(&Scenario::default())?.price();

    tracing::debug!(?kind, points = axis.len(), base_price, "running sweep");

    let point = |x: f64| -> BsmResult<SweepRecord<T::Output>> {
        let scenario = scenario_at(x);
        let result = target.evaluate_scenario(&scenario)?;
        let intrinsic_value = target.intrinsic_scenario(&scenario);
        let price = result.price();
        Ok(SweepRecord {
            axis_value: x,
            days_to_expiration: days_at(x),
            intrinsic_value,
            time_value: price - intrinsic_value,
            pnl: price - base_price,
            result,
        })
    };

    let records = if axis.len() >= PARALLEL_THRESHOLD {
        axis.par_iter().map(|&x| point(x)).collect::<BsmResult<Vec<_>>>()?
    } else {
        axis.iter().map(|&x| point(x)).collect::<BsmResult<Vec<_>>>()?
    };

    Ok(SweepTable {
        kind,
        base_price,
        records,
    })
}

/// Remaining days of a target whose time is frozen
pub(crate) fn frozen_days<T: SweepTarget + ?Sized>(target: &T) -> f64 {
    target.horizon().max(0.0) * REPORTING_DAYS_PER_YEAR
}
