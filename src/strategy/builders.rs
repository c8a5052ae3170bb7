//! Common strategy presets
//!
//! Each preset copies the market inputs (spot, time, vol, rate, dividend
//! yield, underlying symbol) from a base spec. The base quantity scales every
//! leg; short legs get a negative sign.

use super::Strategy;
use crate::core::{BsmError, BsmResult, OptionSpec, OptionType};

/// Default distance of strangle strikes from spot
pub const STRANGLE_WIDTH: f64 = 0.05;

fn leg(base: &OptionSpec, option_type: OptionType, strike: f64, sign: f64, label: &str) -> OptionSpec {
    OptionSpec {
        option_type,
        strike_price: strike,
        quantity: base.quantity * sign,
        label: Some(label.to_string()),
        ..base.clone()
    }
}

fn preset_name(kind: &str, base: &OptionSpec) -> String {
    match &base.underlying {
        Some(symbol) => format!("{} - {}", kind, symbol),
        None => kind.to_string(),
    }
}

/// Long call and long put at the base strike
pub fn long_straddle(base: &OptionSpec) -> Strategy {
    let k = base.strike_price;
    Strategy::named(
        preset_name("Long Straddle", base),
        vec![
            leg(base, OptionType::Call, k, 1.0, "Straddle Call"),
            leg(base, OptionType::Put, k, 1.0, "Straddle Put"),
        ],
    )
}

/// Long OTM call and long OTM put, strikes `width` away from spot
pub fn long_strangle(base: &OptionSpec, width: f64) -> BsmResult<Strategy> {
    if !(width > 0.0 && width < 1.0) {
        return Err(BsmError::invalid_input(format!(
            "strangle width must be in (0, 1), got {}",
            width
        )));
    }
    let s = base.underlying_price;
    Ok(Strategy::named(
        preset_name("Long Strangle", base),
        vec![
            leg(base, OptionType::Call, s * (1.0 + width), 1.0, "Strangle Call"),
            leg(base, OptionType::Put, s * (1.0 - width), 1.0, "Strangle Put"),
        ],
    ))
}

/// Long slightly ITM call (0.98·S), short OTM call (1.05·S)
pub fn bull_call_spread(base: &OptionSpec) -> Strategy {
    let s = base.underlying_price;
    Strategy::named(
        preset_name("Bull Call Spread", base),
        vec![
            leg(base, OptionType::Call, s * 0.98, 1.0, "Spread Long Call"),
            leg(base, OptionType::Call, s * 1.05, -1.0, "Spread Short Call"),
        ],
    )
}

/// Long put wing, short put body, short call body, long call wing.
///
/// `strikes` must be strictly increasing: [put wing, put body, call body, call wing].
pub fn iron_condor(base: &OptionSpec, strikes: [f64; 4]) -> BsmResult<Strategy> {
    if strikes.windows(2).any(|w| !(w[0] < w[1])) || strikes[0] <= 0.0 {
        return Err(BsmError::invalid_input(format!(
            "iron condor strikes must be positive and strictly increasing, got {:?}",
            strikes
        )));
    }
    Ok(Strategy::named(
        preset_name("Iron Condor", base),
        vec![
            leg(base, OptionType::Put, strikes[0], 1.0, "Long Put (Wing)"),
            leg(base, OptionType::Put, strikes[1], -1.0, "Short Put (Body)"),
            leg(base, OptionType::Call, strikes[2], -1.0, "Short Call (Body)"),
            leg(base, OptionType::Call, strikes[3], 1.0, "Long Call (Wing)"),
        ],
    ))
}
