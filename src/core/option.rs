//! Option contract definitions
//!
//! A single European vanilla option together with the market inputs needed to
//! price it under Black-Scholes-Merton.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{BsmError, BsmResult};

/// Risk-free rate used when none is supplied
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

/// Day count used to turn calendar dates into year fractions
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Days per year used when reporting remaining time as days
pub const REPORTING_DAYS_PER_YEAR: f64 = 365.0;

/// Relative distance |S/K - 1| under which an option counts as at the money
pub const ATM_TOLERANCE: f64 = 0.02;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.phi() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = BsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(BsmError::invalid_input(format!(
                "option_type must be 'call' or 'put', got '{}'",
                other
            ))),
        }
    }
}

fn default_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

fn default_quantity() -> f64 {
    1.0
}

/// One option's contract and market parameters.
///
/// `time_to_expiration` may be zero or negative: the evaluator treats both as
/// an expired option and returns intrinsic value. `quantity` only matters when
/// the spec is a leg of a [`Strategy`](crate::strategy::Strategy); negative
/// means short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Current price of the underlying (S)
    pub underlying_price: f64,
    /// Strike price (K)
    pub strike_price: f64,
    /// Time to expiration in years (T)
    pub time_to_expiration: f64,
    /// Annualized risk-free rate (r)
    #[serde(default = "default_rate")]
    pub risk_free_rate: f64,
    /// Annualized volatility (σ)
    pub volatility: f64,
    /// Continuous dividend yield (q)
    #[serde(default)]
    pub dividend_yield: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Signed position size, used by the leg aggregator only
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Underlying symbol (e.g., "AAPL"); legs of one strategy must agree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OptionSpec {
    /// Create a spec with the default rate, no dividends and a quantity of 1
    pub fn new(
        option_type: OptionType,
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        volatility: f64,
    ) -> Self {
        Self {
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            volatility,
            dividend_yield: 0.0,
            option_type,
            quantity: 1.0,
            underlying: None,
            label: None,
        }
    }

    /// Create a call
    pub fn call(underlying_price: f64, strike_price: f64, time_to_expiration: f64, volatility: f64) -> Self {
        Self::new(OptionType::Call, underlying_price, strike_price, time_to_expiration, volatility)
    }

    /// Create a put
    pub fn put(underlying_price: f64, strike_price: f64, time_to_expiration: f64, volatility: f64) -> Self {
        Self::new(OptionType::Put, underlying_price, strike_price, time_to_expiration, volatility)
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_underlying(mut self, symbol: impl Into<String>) -> Self {
        self.underlying = Some(symbol.into());
        self
    }

    pub fn with_underlying_price(mut self, underlying_price: f64) -> Self {
        self.underlying_price = underlying_price;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_time_to_expiration(mut self, time_to_expiration: f64) -> Self {
        self.time_to_expiration = time_to_expiration;
        self
    }

    /// Check the spec's invariants: S > 0, K > 0, σ >= 0, every input finite
    pub fn validate(&self) -> BsmResult<()> {
        let finite = [
            ("underlying_price", self.underlying_price),
            ("strike_price", self.strike_price),
            ("time_to_expiration", self.time_to_expiration),
            ("risk_free_rate", self.risk_free_rate),
            ("volatility", self.volatility),
            ("dividend_yield", self.dividend_yield),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(BsmError::invalid_input(format!("{} must be finite, got {}", name, value)));
            }
        }

        if self.underlying_price <= 0.0 {
            return Err(BsmError::invalid_input(format!(
                "underlying_price must be positive, got {}",
                self.underlying_price
            )));
        }
        if self.strike_price <= 0.0 {
            return Err(BsmError::invalid_input(format!(
                "strike_price must be positive, got {}",
                self.strike_price
            )));
        }
        if self.volatility < 0.0 {
            return Err(BsmError::invalid_input(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }

        Ok(())
    }

    /// Remaining time expressed in days
    pub fn days_to_expiration(&self) -> f64 {
        self.time_to_expiration * REPORTING_DAYS_PER_YEAR
    }

    /// Intrinsic value of one unit at the current underlying price
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.underlying_price, self.strike_price)
    }

    /// Moneyness ratio S/K
    pub fn moneyness(&self) -> f64 {
        self.underlying_price / self.strike_price
    }

    /// Is this option in the money?
    pub fn is_itm(&self) -> bool {
        match self.option_type {
            OptionType::Call => self.underlying_price > self.strike_price,
            OptionType::Put => self.underlying_price < self.strike_price,
        }
    }

    /// Is this option at the money (within relative tolerance)?
    pub fn is_atm(&self, tolerance: f64) -> bool {
        (self.moneyness() - 1.0).abs() < tolerance
    }

    /// Is this option out of the money?
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm(ATM_TOLERANCE)
    }
}

/// Year fraction between two dates (negative once `expiry` has passed)
pub fn time_between(valuation: NaiveDate, expiry: NaiveDate) -> f64 {
    let days = (expiry - valuation).num_days();
    days as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.phi(), 1.0);
        assert_eq!(OptionType::Put.phi(), -1.0);

        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_defaults() {
        let spec = OptionSpec::call(100.0, 105.0, 0.25, 0.2);
        assert_eq!(spec.risk_free_rate, 0.045);
        assert_eq!(spec.quantity, 1.0);
        assert_eq!(spec.dividend_yield, 0.0);

        let json = r#"{"underlying_price":100,"strike_price":105,"time_to_expiration":0.25,
                       "volatility":0.2,"option_type":"put"}"#;
        let parsed: OptionSpec = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.option_type, OptionType::Put);
        assert_eq!(parsed.risk_free_rate, 0.045);
        assert_eq!(parsed.quantity, 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(OptionSpec::call(100.0, 100.0, 0.5, 0.2).validate().is_ok());
        // expired and zero-vol specs are valid inputs
        assert!(OptionSpec::call(100.0, 100.0, -0.1, 0.0).validate().is_ok());

        assert!(matches!(
            OptionSpec::call(0.0, 100.0, 0.5, 0.2).validate(),
            Err(BsmError::InvalidInput(_))
        ));
        assert!(OptionSpec::call(100.0, -1.0, 0.5, 0.2).validate().is_err());
        assert!(OptionSpec::call(100.0, 100.0, 0.5, -0.01).validate().is_err());
        assert!(OptionSpec::call(f64::NAN, 100.0, 0.5, 0.2).validate().is_err());
    }

    #[test]
    fn test_time_between() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

        // ~5 months = ~0.41 years
        let tte = time_between(today, expiry);
        assert!(tte > 0.4 && tte < 0.42);
        assert!(time_between(expiry, today) < 0.0);
    }

    #[test]
    fn test_moneyness() {
        let call = OptionSpec::call(500.0, 500.0, 0.5, 0.2);
        assert!(call.is_atm(0.01));
        assert!(call.clone().with_underlying_price(510.0).is_itm());
        assert!(call.with_underlying_price(480.0).is_otm());

        let put = OptionSpec::put(90.0, 100.0, 0.5, 0.2);
        assert!(put.is_itm());
        assert_eq!(put.intrinsic_value(), 10.0);
    }
}
