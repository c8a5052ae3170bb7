//! Black-Scholes-Merton Model
//!
//! Provides:
//! - Standard normal CDF / PDF
//! - Closed-form European option pricing
//! - Greeks computation
//!
//! Expired options (T <= 0) and zero-volatility options bypass the closed form
//! and are valued at intrinsic value.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::{BsmResult, Greeks, OptionSpec, OptionType, PricingResult, REPORTING_DAYS_PER_YEAR};

/// |x| beyond which the normal CDF is reported as exactly 0 or 1
const CDF_SATURATION: f64 = 8.5;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    if x > CDF_SATURATION {
        return 1.0;
    }
    if x < -CDF_SATURATION {
        return 0.0;
    }
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate - div + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, div, vol, time) - vol * time.sqrt()
}

/// Intrinsic value of one unit
pub fn intrinsic_value(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    option_type.intrinsic(spot, strike)
}

/// Price and Greeks for one option.
///
/// Fails with [`BsmError::InvalidInput`](crate::core::BsmError::InvalidInput)
/// when S or K is not positive, σ is negative, or any input is not finite.
/// `quantity` is ignored here.
pub fn evaluate(spec: &OptionSpec) -> BsmResult<PricingResult> {
    spec.validate()?;

    let spot = spec.underlying_price;
    let strike = spec.strike_price;
    let time = spec.time_to_expiration;
    let vol = spec.volatility;

    // σ√T can underflow to 0 for a tiny positive σ
    if time <= 0.0 || vol <= 0.0 || vol * time.sqrt() <= 0.0 {
        return Ok(expired(spot, strike, spec.option_type));
    }

    let result = closed_form(spot, strike, spec.risk_free_rate, spec.dividend_yield, vol, time, spec.option_type);
    if !result.is_finite() {
        return Ok(expired(spot, strike, spec.option_type));
    }
    Ok(result)
}

/// Black-Scholes European option price
pub fn price(spec: &OptionSpec) -> BsmResult<f64> {
    evaluate(spec).map(|r| r.price)
}

/// Black-Scholes Greeks
pub fn greeks(spec: &OptionSpec) -> BsmResult<Greeks> {
    evaluate(spec).map(|r| r.greeks)
}

/// Limiting result at expiry or zero vol
fn expired(spot: f64, strike: f64, option_type: OptionType) -> PricingResult {
    let delta = match option_type {
        OptionType::Call => if spot > strike { 1.0 } else { 0.0 },
        OptionType::Put => if spot < strike { -1.0 } else { 0.0 },
    };
    PricingResult::new(
        option_type.intrinsic(spot, strike),
        Greeks::new(delta, 0.0, 0.0, 0.0, 0.0),
    )
}

fn closed_form(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult {
    let phi = option_type.phi();
    let sqrt_t = time.sqrt();
    let d1 = d1(spot, strike, rate, div, vol, time);
    let d2 = d2(spot, strike, rate, div, vol, time);

    // Discounted spot and strike
    let fwd = spot * (-div * time).exp();
    let pv_strike = strike * (-rate * time).exp();

    let n1 = norm_cdf(phi * d1);
    let n2 = norm_cdf(phi * d2);
    let pdf_d1 = norm_pdf(d1);

    let price = phi * (fwd * n1 - pv_strike * n2);
    let delta = phi * (-div * time).exp() * n1;
    let gamma = fwd * pdf_d1 / (spot * spot * vol * sqrt_t);

    // per 1 vol point
    let vega = fwd * pdf_d1 * sqrt_t / 100.0;

    // per calendar day
    let decay = -fwd * pdf_d1 * vol / (2.0 * sqrt_t);
    let theta = (decay - phi * rate * pv_strike * n2 + phi * div * fwd * n1) / REPORTING_DAYS_PER_YEAR;

    // per 1% rate move
    let rho = phi * time * pv_strike * n2 / 100.0;

    PricingResult::new(price.max(0.0), Greeks::new(delta, gamma, theta, vega, rho))
}
