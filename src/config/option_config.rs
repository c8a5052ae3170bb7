//! Option configuration records
//!
//! The file-level shape of one option: a ticker, prices, an expiration date
//! (or an explicit year fraction) and an implied volatility.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::read_document;
use crate::core::{time_between, BsmError, BsmResult, OptionSpec, OptionType, DEFAULT_RISK_FREE_RATE};

fn default_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

fn default_quantity() -> f64 {
    1.0
}

/// Accepts "call", "Call", "PUT", ...
fn option_type_any_case<'de, D>(deserializer: D) -> Result<OptionType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// One option as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Underlying symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Current underlying price
    pub current_price: f64,
    pub strike_price: f64,
    /// Expiration date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    /// Year fraction; takes precedence over `expiration_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_expiration: Option<f64>,
    #[serde(deserialize_with = "option_type_any_case")]
    pub option_type: OptionType,
    #[serde(alias = "volatility")]
    pub implied_volatility: f64,
    #[serde(default = "default_rate")]
    pub risk_free_rate: f64,
    #[serde(default)]
    pub dividend_yield: f64,
    /// Signed position size
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OptionConfig {
    /// Load a single option from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> BsmResult<Self> {
        let config: Self = read_document(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and numeric ranges
    pub fn validate(&self) -> BsmResult<()> {
        let positive = [
            ("current_price", self.current_price),
            ("strike_price", self.strike_price),
            ("implied_volatility", self.implied_volatility),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BsmError::config(format!("{} must be a positive number, got {}", field, value)));
            }
        }

        let finite = [
            ("risk_free_rate", self.risk_free_rate),
            ("dividend_yield", self.dividend_yield),
            ("quantity", self.quantity),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(BsmError::config(format!("{} must be a number, got {}", field, value)));
            }
        }

        match (self.time_to_expiration, self.expiration_date) {
            (Some(t), _) if !t.is_finite() => Err(BsmError::config(format!(
                "time_to_expiration must be a number, got {}",
                t
            ))),
            (None, None) => Err(BsmError::config(format!(
                "{}: one of expiration_date or time_to_expiration is required",
                self.display_name()
            ))),
            _ => Ok(()),
        }
    }

    /// Name, ticker, or a generic fallback
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| {
                self.ticker
                    .as_ref()
                    .map(|t| format!("{} {} ${}", t, self.option_type, self.strike_price))
            })
            .unwrap_or_else(|| format!("{} ${}", self.option_type, self.strike_price))
    }

    /// Years from `valuation_date` to expiry
    pub fn time_to_expiration(&self, valuation_date: NaiveDate) -> BsmResult<f64> {
        match (self.time_to_expiration, self.expiration_date) {
            (Some(t), _) => Ok(t),
            (None, Some(expiry)) => Ok(time_between(valuation_date, expiry)),
            (None, None) => Err(BsmError::config("missing expiration_date")),
        }
    }

    /// Convert to a priceable spec as of `valuation_date`
    pub fn to_spec(&self, valuation_date: NaiveDate) -> BsmResult<OptionSpec> {
        self.validate()?;
        Ok(OptionSpec {
            underlying_price: self.current_price,
            strike_price: self.strike_price,
            time_to_expiration: self.time_to_expiration(valuation_date)?,
            risk_free_rate: self.risk_free_rate,
            volatility: self.implied_volatility,
            dividend_yield: self.dividend_yield,
            option_type: self.option_type,
            quantity: self.quantity,
            underlying: self.ticker.clone(),
            label: Some(self.display_name()),
        })
    }
}
