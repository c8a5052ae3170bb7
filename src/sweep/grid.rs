//! Price × time P&L surface
//!
//! Evaluates a target on the product of an underlying-price axis and a
//! remaining-time axis. Rows follow prices ascending, columns follow
//! remaining time from T0 down to expiry.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::time_decay::time_axis;
use super::{linspace, validate_points, validate_range, Scenario, SweepTarget, PARALLEL_THRESHOLD};
use crate::core::{BsmError, BsmResult, Valuation};

/// Value and P&L grids [price, time]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlSurface {
    /// Underlying prices (rows), ascending
    pub prices: Vec<f64>,
    /// Remaining times in years (columns), descending
    pub remaining_times: Vec<f64>,
    /// Target value at each grid point
    pub values: Array2<f64>,
    /// values - base_price
    pub pnl: Array2<f64>,
    /// Value of the unshifted target
    pub base_price: f64,
}

impl PnlSurface {
    /// Largest P&L on the grid
    pub fn max_profit(&self) -> f64 {
        self.pnl.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest P&L on the grid
    pub fn max_loss(&self) -> f64 {
        self.pnl.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// P&L profile at expiry (last column)
    pub fn expiry_pnl(&self) -> Vec<f64> {
        let last = self.remaining_times.len().saturating_sub(1);
        self.pnl.column(last).to_vec()
    }
}

/// Build the price × time surface for a single option or a strategy
pub fn price_time_grid<T: SweepTarget + ?Sized>(
    target: &T,
    price_range: (f64, f64),
    num_prices: usize,
    time_points: usize,
) -> BsmResult<PnlSurface> {
    validate_range("price", price_range, num_prices)?;
    validate_points("time", time_points)?;
    if price_range.0 <= 0.0 {
        return Err(BsmError::invalid_range(format!(
            "underlying prices must be positive, got low = {}",
            price_range.0
        )));
    }

    let base_price = target.evaluate_scenario(&Scenario::default())?.price();
    let prices = linspace(price_range.0, price_range.1, num_prices);
    let remaining_times = time_axis(target.horizon().max(0.0), time_points);

    tracing::debug!(num_prices, time_points, "building price/time surface");

    let points: Vec<(f64, f64)> = prices
        .iter()
        .flat_map(|&s| remaining_times.iter().map(move |&t| (s, t)))
        .collect();

    let value_at = |&(s, t): &(f64, f64)| -> BsmResult<f64> {
        target
            .evaluate_scenario(&Scenario::at_remaining(t).with_price(s))
            .map(|r| r.price())
    };

    let flat = if points.len() >= PARALLEL_THRESHOLD {
        points.par_iter().map(value_at).collect::<BsmResult<Vec<f64>>>()?
    } else {
        points.iter().map(value_at).collect::<BsmResult<Vec<f64>>>()?
    };

    let values = Array2::from_shape_fn((num_prices, time_points), |(i, j)| flat[i * time_points + j]);
    let pnl = values.mapv(|v| v - base_price);

    Ok(PnlSurface {
        prices,
        remaining_times,
        values,
        pnl,
        base_price,
    })
}
