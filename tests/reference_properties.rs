// Reference values and model properties for the Black-Scholes-Merton
// evaluator, leg aggregation and sweeps, checked through the public API.

use bsm_options::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A small grid of valid, non-degenerate inputs: (S, K, T, r, σ)
fn input_grid() -> Vec<(f64, f64, f64, f64, f64)> {
    let mut grid = Vec::new();
    for &s in &[50.0, 90.0, 100.0, 110.0, 200.0] {
        for &k in &[80.0, 100.0, 120.0] {
            for &t in &[0.01, 0.25, 1.0, 3.0] {
                for &r in &[0.0, 0.045, 0.1] {
                    for &sigma in &[0.05, 0.2, 0.6] {
                        grid.push((s, k, t, r, sigma));
                    }
                }
            }
        }
    }
    grid
}

fn pair(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> (OptionSpec, OptionSpec) {
    (
        OptionSpec::call(s, k, t, sigma).with_rate(r),
        OptionSpec::put(s, k, t, sigma).with_rate(r),
    )
}

// ---------------------------------------------------------------------------
// Closed-form reference values
// ---------------------------------------------------------------------------

#[test]
fn atm_one_year_reference() {
    let (call, put) = pair(100.0, 100.0, 1.0, 0.05, 0.2);
    assert!((bs_price(&call).unwrap() - 10.450583572185565).abs() < 1e-9);
    assert!((bs_price(&put).unwrap() - 5.573526022256971).abs() < 1e-9);
}

#[test]
fn otm_quarter_year_reference() {
    // S=100, K=105, T=0.25, r=5%, σ=20%
    let spec = OptionSpec::call(100.0, 105.0, 0.25, 0.2).with_rate(0.05);
    let result = evaluate(&spec).unwrap();

    assert!((result.price - 2.477901874073254).abs() < 1e-9);
    assert!((result.greeks.delta - 0.3771776951375382).abs() < 1e-9);
    assert!(result.greeks.gamma > 0.0);
    assert!(result.greeks.theta < 0.0);
}

// ---------------------------------------------------------------------------
// Model properties
// ---------------------------------------------------------------------------

#[test]
fn put_call_parity() {
    for (s, k, t, r, sigma) in input_grid() {
        let (call, put) = pair(s, k, t, r, sigma);
        let lhs = bs_price(&call).unwrap() - bs_price(&put).unwrap();
        let rhs = s - k * (-r * t).exp();
        assert!(
            (lhs - rhs).abs() < 1e-6,
            "parity broken at S={} K={} T={} r={} σ={}: {} vs {}",
            s,
            k,
            t,
            r,
            sigma,
            lhs,
            rhs
        );
    }
}

#[test]
fn put_call_parity_with_dividends() {
    for (s, k, t, r, sigma) in input_grid() {
        let q = 0.03;
        let call = OptionSpec::call(s, k, t, sigma).with_rate(r).with_dividend_yield(q);
        let put = OptionSpec::put(s, k, t, sigma).with_rate(r).with_dividend_yield(q);
        let lhs = bs_price(&call).unwrap() - bs_price(&put).unwrap();
        let rhs = s * (-q * t).exp() - k * (-r * t).exp();
        assert!((lhs - rhs).abs() < 1e-6);
    }
}

#[test]
fn expiration_limit() {
    for &(s, k) in &[(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let at_expiry = OptionSpec::new(option_type, s, k, 0.0, 0.25).with_rate(0.05);
            let expired = evaluate(&at_expiry).unwrap();

            let intrinsic = option_type.intrinsic(s, k);
            assert_eq!(expired.price, intrinsic);
            assert_eq!(expired.greeks.gamma, 0.0);
            assert_eq!(expired.greeks.theta, 0.0);
            assert_eq!(expired.greeks.vega, 0.0);
            assert_eq!(expired.greeks.rho, 0.0);
            assert!(expired.greeks.delta.is_finite());

            // approaching from above converges to the same value
            let near = evaluate(&at_expiry.clone().with_time_to_expiration(1e-10)).unwrap();
            assert!(near.price.is_finite());
            assert!((near.price - intrinsic).abs() < 1e-3, "{} vs {}", near.price, intrinsic);
        }
    }

    let itm_call = evaluate(&OptionSpec::call(110.0, 100.0, 0.0, 0.2)).unwrap();
    let itm_put = evaluate(&OptionSpec::put(90.0, 100.0, 0.0, 0.2)).unwrap();
    let atm_call = evaluate(&OptionSpec::call(100.0, 100.0, 0.0, 0.2)).unwrap();
    assert_eq!(itm_call.greeks.delta, 1.0);
    assert_eq!(itm_put.greeks.delta, -1.0);
    assert_eq!(atm_call.greeks.delta, 0.0);
}

#[test]
fn delta_bounds() {
    for (s, k, t, r, sigma) in input_grid() {
        let (call, put) = pair(s, k, t, r, sigma);
        let call_delta = bs_greeks(&call).unwrap().delta;
        let put_delta = bs_greeks(&put).unwrap().delta;
        assert!((0.0..=1.0).contains(&call_delta), "call delta {}", call_delta);
        assert!((-1.0..=0.0).contains(&put_delta), "put delta {}", put_delta);
    }
}

#[test]
fn monotone_in_underlying_price() {
    for &(t, sigma) in &[(0.05, 0.1), (0.5, 0.3), (2.0, 0.8)] {
        let call = OptionSpec::call(100.0, 100.0, t, sigma);
        let put = OptionSpec::put(100.0, 100.0, t, sigma);

        let calls = price_scenarios(&call, (1.0, 400.0), 200).unwrap().prices();
        let puts = price_scenarios(&put, (1.0, 400.0), 200).unwrap().prices();
        assert!(calls.windows(2).all(|w| w[0] <= w[1] + 1e-12));
        assert!(puts.windows(2).all(|w| w[0] + 1e-12 >= w[1]));
    }
}

#[test]
fn prices_never_negative() {
    for (s, k, t, r, sigma) in input_grid() {
        let (call, put) = pair(s, k, t, r, sigma);
        assert!(bs_price(&call).unwrap() >= 0.0);
        assert!(bs_price(&put).unwrap() >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// Aggregation and sweeps
// ---------------------------------------------------------------------------

#[test]
fn single_leg_aggregation_is_plain_evaluation() {
    for (s, k, t, r, sigma) in input_grid().into_iter().step_by(7) {
        let (call, put) = pair(s, k, t, r, sigma);
        for leg in [call, put] {
            let direct = evaluate(&leg).unwrap();
            let aggregated = aggregate(std::slice::from_ref(&leg)).unwrap();
            assert_eq!(aggregated.price, direct.price);
            assert_eq!(aggregated.greeks, direct.greeks);
            assert_eq!(aggregated.legs, vec![direct]);
        }
    }
}

#[test]
fn sweeps_are_idempotent() {
    let spec = OptionSpec::put(100.0, 95.0, 0.5, 0.3);
    let strategy = long_straddle(&spec);

    for params in [
        SweepParams::Time { time_points: 30 },
        SweepParams::price_default(100.0),
        SweepParams::volatility_default(),
        SweepParams::Price {
            range: (50.0, 150.0),
            num_prices: 150,
        },
    ] {
        assert_eq!(sweep(&spec, &params).unwrap(), sweep(&spec, &params).unwrap());
        assert_eq!(sweep(&strategy, &params).unwrap(), sweep(&strategy, &params).unwrap());
    }
}

#[test]
fn time_decay_reference_axis() {
    let spec = OptionSpec::call(100.0, 105.0, 0.25, 0.2).with_rate(0.05);
    let table = time_decay(&spec, 5).unwrap();

    assert_eq!(table.axis_values(), vec![0.25, 0.1875, 0.125, 0.0625, 0.0]);
    let at_expiry = evaluate(&spec.with_time_to_expiration(0.0)).unwrap();
    assert_eq!(table.records[4].result, at_expiry);
}

#[test]
fn price_scenario_reference_axis() {
    let spec = OptionSpec::call(175.0, 180.0, 30.0 / 365.25, 0.3);
    let table = price_scenarios(&spec, (150.0, 200.0), 3).unwrap();
    assert_eq!(table.axis_values(), vec![150.0, 175.0, 200.0]);
}

#[test]
fn invalid_inputs_are_reported() {
    assert!(matches!(
        evaluate(&OptionSpec::call(-100.0, 100.0, 1.0, 0.2)),
        Err(BsmError::InvalidInput(_))
    ));
    assert!(matches!(aggregate(&[]), Err(BsmError::EmptyStrategy)));

    let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.2);
    assert!(matches!(
        price_scenarios(&spec, (200.0, 150.0), 3),
        Err(BsmError::InvalidRange(_))
    ));

    let mixed = vec![
        spec.clone().with_underlying("AAA"),
        spec.with_underlying("BBB").with_quantity(-1.0),
    ];
    assert!(matches!(aggregate(&mixed), Err(BsmError::MixedUnderlying { .. })));
}
