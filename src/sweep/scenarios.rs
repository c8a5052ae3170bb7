//! Price-scenario and volatility sweeps

use super::{frozen_days, linspace, run, validate_range, Scenario, SweepKind, SweepTable, SweepTarget};
use crate::core::{BsmError, BsmResult};

/// Price the target at `num_prices` underlying prices from `low` to `high`,
/// time, rate and vol held at their current values.
///
/// `pnl` on each record is the mark-to-market change against the target's
/// current price. Fails with `InvalidRange` when `low >= high`, `low <= 0`,
/// or fewer than 2 points are requested.
pub fn price_scenarios<T: SweepTarget + ?Sized>(
    target: &T,
    (low, high): (f64, f64),
    num_prices: usize,
) -> BsmResult<SweepTable<T::Output>> {
    validate_range("price", (low, high), num_prices)?;
    if low <= 0.0 {
        return Err(BsmError::invalid_range(format!(
            "underlying prices must be positive, got low = {}",
            low
        )));
    }

    let days = frozen_days(target);
    run(
        target,
        SweepKind::Price,
        linspace(low, high, num_prices),
        Scenario::at_price,
        |_| days,
    )
}

/// Price the target at `num_vols` volatilities from `low` to `high`, spot,
/// strike, time and rate held fixed.
///
/// A negative `low` is rejected rather than clamped; `low == 0` is allowed
/// and evaluates to intrinsic value at that point.
pub fn volatility_scenarios<T: SweepTarget + ?Sized>(
    target: &T,
    (low, high): (f64, f64),
    num_vols: usize,
) -> BsmResult<SweepTable<T::Output>> {
    validate_range("volatility", (low, high), num_vols)?;
    if low < 0.0 {
        return Err(BsmError::invalid_range(format!(
            "volatility must be non-negative, got low = {}",
            low
        )));
    }

    let days = frozen_days(target);
    run(
        target,
        SweepKind::Volatility,
        linspace(low, high, num_vols),
        Scenario::at_volatility,
        |_| days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionSpec, Valuation};
    use crate::models::evaluate;
    use crate::strategy::iron_condor;

    #[test]
    fn test_reference_price_axis() {
        let spec = OptionSpec::call(175.0, 180.0, 0.1, 0.3);
        let table = price_scenarios(&spec, (150.0, 200.0), 3).unwrap();
        assert_eq!(table.axis_values(), vec![150.0, 175.0, 200.0]);
        assert_eq!(table.kind, SweepKind::Price);
    }

    #[test]
    fn test_pnl_against_entry_price() {
        let spec = OptionSpec::call(100.0, 100.0, 0.25, 0.2);
        let entry = evaluate(&spec).unwrap().price;
        let table = price_scenarios(&spec, (80.0, 120.0), 5).unwrap();

        assert_eq!(table.base_price, entry);
        for record in &table {
            assert!((record.pnl - (record.result.price - entry)).abs() < 1e-12);
        }
        // the 100 point is the entry itself
        assert!(table.records[2].pnl.abs() < 1e-12);
    }

    #[test]
    fn test_monotone_in_spot() {
        let call = OptionSpec::call(100.0, 100.0, 0.5, 0.25);
        let put = OptionSpec::put(100.0, 100.0, 0.5, 0.25);

        let calls = price_scenarios(&call, (50.0, 150.0), 41).unwrap().prices();
        let puts = price_scenarios(&put, (50.0, 150.0), 41).unwrap().prices();
        assert!(calls.windows(2).all(|w| w[0] <= w[1]));
        assert!(puts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_intrinsic_and_time_value_columns() {
        let spec = OptionSpec::put(100.0, 100.0, 0.5, 0.25);
        let table = price_scenarios(&spec, (80.0, 120.0), 3).unwrap();
        assert_eq!(table.records[0].intrinsic_value, 20.0);
        assert_eq!(table.records[2].intrinsic_value, 0.0);
        for record in &table {
            assert!((record.time_value - (record.result.price - record.intrinsic_value)).abs() < 1e-12);
            assert!((record.days_to_expiration - 0.5 * 365.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_price_ranges() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.25);
        for (range, n) in [
            ((120.0, 80.0), 5),
            ((100.0, 100.0), 5),
            ((80.0, 120.0), 1),
            ((0.0, 120.0), 5),
            ((f64::NAN, 120.0), 5),
        ] {
            assert!(
                matches!(price_scenarios(&spec, range, n), Err(BsmError::InvalidRange(_))),
                "{:?} with {} points",
                range,
                n
            );
        }
    }

    #[test]
    fn test_volatility_sweep() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.25);
        let table = volatility_scenarios(&spec, (0.1, 0.8), 15).unwrap();

        let axis = table.axis_values();
        assert_eq!(axis.len(), 15);
        assert_eq!(axis[0], 0.1);
        assert_eq!(axis[14], 0.8);
        // long options gain value with vol
        assert!(table.prices().windows(2).all(|w| w[0] < w[1]));
        assert!(table.iter().all(|r| r.result.greeks().vega > 0.0));
    }

    #[test]
    fn test_volatility_zero_lower_bound() {
        let spec = OptionSpec::call(110.0, 100.0, 0.5, 0.25);
        let table = volatility_scenarios(&spec, (0.0, 0.5), 3).unwrap();
        assert_eq!(table.records[0].result.price, 10.0);
        assert_eq!(table.records[0].time_value, 0.0);
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.25);
        assert!(matches!(
            volatility_scenarios(&spec, (-0.1, 0.5), 5),
            Err(BsmError::InvalidRange(_))
        ));
        assert!(matches!(
            volatility_scenarios(&spec, (0.5, 0.1), 5),
            Err(BsmError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_volatility_sweep_needs_two_points() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.25);
        for n in [0, 1] {
            assert!(matches!(
                volatility_scenarios(&spec, (0.1, 0.8), n),
                Err(BsmError::InvalidRange(_))
            ));
        }
        assert!(matches!(
            volatility_scenarios(&spec, (0.3, 0.3), 5),
            Err(BsmError::InvalidRange(_))
        ));
        assert_eq!(volatility_scenarios(&spec, (0.1, 0.8), 2).unwrap().len(), 2);
    }

    #[test]
    fn test_short_vol_strategy_loses_when_vol_rises() {
        let base = OptionSpec::call(100.0, 100.0, 0.25, 0.25);
        let condor = iron_condor(&base, [90.0, 95.0, 105.0, 110.0]).unwrap();
        let table = volatility_scenarios(&condor, (0.25, 0.6), 4).unwrap();

        assert!(table.records[0].pnl.abs() < 1e-12);
        assert!(table.records[3].pnl < 0.0);
        assert!(table.records[0].result.greeks.vega < 0.0);
    }
}
