//! Time-decay sweep
//!
//! Walks remaining time from T0 down to 0 with spot, strike, rate and vol held
//! fixed. This is value erosion under frozen markets: neither S nor σ is
//! forecast to move.

use super::{run, validate_points, Scenario, SweepKind, SweepTable, SweepTarget};
use crate::core::{BsmResult, REPORTING_DAYS_PER_YEAR};

/// Remaining-time axis T0·(1 - i/(n-1)) for i = 0..n
pub fn time_axis(t0: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![t0; n];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| t0 * (1.0 - i as f64 / last)).collect()
}

/// Price the target at `time_points` evenly spaced remaining times, T0 first
/// and expiry (0) last.
///
/// T0 is the target's longest time to expiration, clamped at 0 for an
/// already expired target. Each record's `days_to_expiration` is `T·365`.
pub fn time_decay<T: SweepTarget + ?Sized>(target: &T, time_points: usize) -> BsmResult<SweepTable<T::Output>> {
    validate_points("time", time_points)?;

    let t0 = target.horizon().max(0.0);
    run(
        target,
        SweepKind::Time,
        time_axis(t0, time_points),
        Scenario::at_remaining,
        |t| t * REPORTING_DAYS_PER_YEAR,
    )
}

/// Time decay with the underlying moved to `underlying_price` for every point
pub fn time_decay_at_price<T: SweepTarget + ?Sized>(
    target: &T,
    underlying_price: f64,
    time_points: usize,
) -> BsmResult<SweepTable<T::Output>> {
    validate_points("time", time_points)?;

    let t0 = target.horizon().max(0.0);
    run(
        target,
        SweepKind::Time,
        time_axis(t0, time_points),
        |t| Scenario::at_remaining(t).with_price(underlying_price),
        |t| t * REPORTING_DAYS_PER_YEAR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BsmError, OptionSpec};
    use crate::models::evaluate;
    use crate::strategy::Strategy;

    #[test]
    fn test_reference_axis() {
        let spec = OptionSpec::call(100.0, 105.0, 0.25, 0.2).with_rate(0.05);
        let table = time_decay(&spec, 5).unwrap();

        assert_eq!(table.axis_values(), vec![0.25, 0.1875, 0.125, 0.0625, 0.0]);
        assert_eq!(table.records[0].days_to_expiration, 0.25 * 365.0);
        assert_eq!(table.records[4].days_to_expiration, 0.0);

        let expired = evaluate(&spec.clone().with_time_to_expiration(0.0)).unwrap();
        assert_eq!(table.records[4].result, expired);
        assert_eq!(table.records[4].time_value, 0.0);
    }

    #[test]
    fn test_first_point_is_base() {
        let spec = OptionSpec::put(100.0, 100.0, 0.5, 0.3);
        let table = time_decay(&spec, 10).unwrap();

        assert_eq!(table.records[0].result, evaluate(&spec).unwrap());
        assert_eq!(table.records[0].pnl, 0.0);
        assert_eq!(table.base_price, table.records[0].result.price);
    }

    #[test]
    fn test_atm_value_erodes() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.3);
        let table = time_decay(&spec, 20).unwrap();

        let prices = table.prices();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
        assert!(table.records.iter().all(|r| r.pnl <= 0.0));
        assert_eq!(*prices.last().unwrap(), 0.0);
    }

    #[test]
    fn test_too_few_points() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.3);
        assert!(matches!(time_decay(&spec, 1), Err(BsmError::InvalidRange(_))));
        assert!(matches!(time_decay(&spec, 0), Err(BsmError::InvalidRange(_))));
    }

    #[test]
    fn test_expired_target() {
        let spec = OptionSpec::call(110.0, 100.0, -0.1, 0.3);
        let table = time_decay(&spec, 3).unwrap();
        assert_eq!(table.axis_values(), vec![0.0, 0.0, 0.0]);
        assert!(table.prices().iter().all(|&p| p == 10.0));
    }

    #[test]
    fn test_calendar_legs_expire_in_turn() {
        // short front month, long back month
        let strategy = Strategy::new(vec![
            OptionSpec::call(100.0, 100.0, 0.25, 0.3).with_quantity(-1.0),
            OptionSpec::call(100.0, 100.0, 0.5, 0.3),
        ]);
        let table = time_decay(&strategy, 5).unwrap();

        assert_eq!(table.axis_values(), vec![0.5, 0.375, 0.25, 0.125, 0.0]);
        // the front leg is at expiry when the back leg has 0.25 left
        let mid = &table.records[2].result;
        assert_eq!(mid.legs[0].price, 0.0);
        assert!(mid.legs[1].price > 0.0);
    }

    #[test]
    fn test_at_price() {
        let spec = OptionSpec::call(100.0, 100.0, 0.5, 0.3);
        let table = time_decay_at_price(&spec, 120.0, 4).unwrap();
        assert_eq!(table.records[3].result.price, 20.0);
        assert_eq!(table.records[3].intrinsic_value, 20.0);
    }
}
