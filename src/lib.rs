//! # BSM Options - Black-Scholes-Merton Pricing and Sweeps
//!
//! Prices European vanilla options in closed form, derives their Greeks, and
//! sweeps model inputs to show how value and risk evolve.
//!
//! ## Key Components
//!
//! - **Black-Scholes-Merton**: price and Greeks with continuous dividend yield
//! - **Strategies**: multi-leg aggregation by signed quantity, common presets
//! - **Sweeps**: time decay, price scenarios, volatility sensitivity, price × time surface
//! - **Config**: JSON/YAML option files with simulation settings
//! - **Analysis**: per-option summaries and full sweep reports
//!
//! ## Conventions
//!
//! - Vega is per 1 vol point (σ + 0.01)
//! - Theta is per calendar day (annual / 365)
//! - Rho is per 1% rate move
//! - At T <= 0 or σ <= 0 the price is undiscounted intrinsic value
//! - Strategy price > 0 is a net debit, < 0 a net credit
//!
//! ## Usage
//!
//! ```rust
//! use bsm_options::prelude::*;
//!
//! let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.2).with_rate(0.05);
//! let result = evaluate(&spec).unwrap();
//! assert!((result.price - 10.4506).abs() < 1e-4);
//!
//! // Same sweeps for one option or a whole strategy
//! let decay = time_decay(&spec, 5).unwrap();
//! assert_eq!(decay.axis_values(), vec![1.0, 0.75, 0.5, 0.25, 0.0]);
//!
//! let straddle = long_straddle(&spec);
//! let scenarios = price_scenarios(&straddle, (80.0, 120.0), 5).unwrap();
//! assert_eq!(scenarios.len(), 5);
//! ```
//!
//! ## What This Library Does NOT Do
//!
//! - Price American or exotic options
//! - Solve for implied volatility
//! - Fetch market data
//! - Render charts or write spreadsheets
//!
//! Logging goes through `tracing`; install any subscriber to see it.

pub mod analysis;
pub mod config;
pub mod core;
pub mod models;
pub mod strategy;
pub mod sweep;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        time_between, BsmError, BsmResult, Greeks, OptionSpec, OptionType, PortfolioGreeks, PricingResult,
        Valuation, ATM_TOLERANCE, DEFAULT_RISK_FREE_RATE,
    };

    // Black-Scholes
    pub use crate::models::{evaluate, greeks as bs_greeks, norm_cdf, norm_pdf, price as bs_price};

    // Strategies
    pub use crate::strategy::{
        aggregate, bull_call_spread, iron_condor, long_straddle, long_strangle, Strategy, StrategyResult,
    };

    // Sweeps
    pub use crate::sweep::{
        price_scenarios, price_time_grid, sweep, time_decay, time_decay_at_price, volatility_scenarios, PnlSurface,
        Scenario, SweepKind, SweepParams, SweepRecord, SweepTable, SweepTarget,
    };

    // Config and analysis
    pub use crate::analysis::{AnalysisReport, Analyzer, Moneyness, OptionSummary};
    pub use crate::config::{AnalysisConfig, OptionConfig, SimulationSettings};
}

// Re-export main types at crate root
pub use crate::core::{BsmError, BsmResult, OptionSpec, OptionType};
pub use crate::strategy::Strategy;
