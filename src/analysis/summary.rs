//! Point-in-time summary of a single option

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{BsmResult, Greeks, OptionSpec, OptionType, ATM_TOLERANCE};
use crate::models::evaluate;

/// Where the underlying sits relative to the strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Moneyness {
    Itm,
    Atm,
    Otm,
}

impl Moneyness {
    /// ITM first; otherwise ATM when S/K is within [`ATM_TOLERANCE`] of 1
    pub fn classify(spec: &OptionSpec) -> Self {
        if spec.is_itm() {
            Moneyness::Itm
        } else if spec.is_atm(ATM_TOLERANCE) {
            Moneyness::Atm
        } else {
            Moneyness::Otm
        }
    }
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moneyness::Itm => write!(f, "ITM"),
            Moneyness::Atm => write!(f, "ATM"),
            Moneyness::Otm => write!(f, "OTM"),
        }
    }
}

/// Price, value decomposition and Greeks of one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub option_type: OptionType,
    pub underlying_price: f64,
    pub strike_price: f64,
    pub volatility: f64,
    pub days_to_expiration: f64,
    /// Signed position size; every other figure is per unit
    pub quantity: f64,
    pub price: f64,
    pub intrinsic_value: f64,
    /// price - intrinsic_value
    pub time_value: f64,
    #[serde(flatten)]
    pub greeks: Greeks,
    /// S/K
    pub moneyness: f64,
    pub status: Moneyness,
}

impl OptionSummary {
    pub fn from_spec(spec: &OptionSpec) -> BsmResult<Self> {
        let result = evaluate(spec)?;
        let intrinsic_value = spec.intrinsic_value();

        Ok(Self {
            label: spec.label.clone(),
            option_type: spec.option_type,
            underlying_price: spec.underlying_price,
            strike_price: spec.strike_price,
            volatility: spec.volatility,
            days_to_expiration: spec.days_to_expiration().max(0.0),
            quantity: spec.quantity,
            price: result.price,
            intrinsic_value,
            time_value: result.price - intrinsic_value,
            greeks: result.greeks,
            moneyness: spec.moneyness(),
            status: Moneyness::classify(spec),
        })
    }
}
