//! Full analysis runs
//!
//! An [`Analyzer`] runs all three sweeps over a target with one set of
//! [`SimulationSettings`] and bundles them with the current valuation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::summary::OptionSummary;
use crate::config::{AnalysisConfig, SimulationSettings};
use crate::core::{BsmResult, OptionSpec, PricingResult, Valuation};
use crate::strategy::{Strategy, StrategyResult};
use crate::sweep::{price_scenarios, time_decay, volatility_scenarios, SweepTable, SweepTarget};

/// Everything computed for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport<O> {
    pub name: String,
    /// Price and Greeks at current inputs
    pub valuation: O,
    /// One summary per leg (a single entry for a lone option)
    pub summaries: Vec<OptionSummary>,
    pub time_decay: SweepTable<O>,
    pub price_scenarios: SweepTable<O>,
    pub volatility_scenarios: SweepTable<O>,
}

impl<O: Valuation> AnalysisReport<O> {
    /// Value lost between now and expiry with markets frozen
    pub fn total_decay(&self) -> f64 {
        self.time_decay
            .records
            .last()
            .map(|r| -r.pnl)
            .unwrap_or(0.0)
    }

    /// Best and worst P&L across the price scenarios
    pub fn price_pnl_bounds(&self) -> (f64, f64) {
        self.price_scenarios
            .iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), r| {
                (hi.max(r.pnl), lo.min(r.pnl))
            })
    }
}

/// Runs time, price and volatility sweeps with shared settings
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    settings: SimulationSettings,
}

impl Analyzer {
    pub fn new(settings: SimulationSettings) -> BsmResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn analyze_option(&self, spec: &OptionSpec) -> BsmResult<AnalysisReport<PricingResult>> {
        let name = spec
            .label
            .clone()
            .unwrap_or_else(|| format!("{} ${}", spec.option_type, spec.strike_price));
        self.run(spec, name, vec![OptionSummary::from_spec(spec)?])
    }

    pub fn analyze_strategy(&self, strategy: &Strategy) -> BsmResult<AnalysisReport<StrategyResult>> {
        let name = strategy
            .name
            .clone()
            .unwrap_or_else(|| format!("{}-leg strategy", strategy.len()));
        let summaries = strategy
            .legs
            .iter()
            .map(OptionSummary::from_spec)
            .collect::<BsmResult<Vec<_>>>()?;
        self.run(strategy, name, summaries)
    }

    /// Analyze every configured option on its own, as of `valuation_date`
    pub fn analyze_config(
        &self,
        config: &AnalysisConfig,
        valuation_date: NaiveDate,
    ) -> BsmResult<Vec<AnalysisReport<PricingResult>>> {
        config
            .to_specs(valuation_date)?
            .iter()
            .map(|spec| self.analyze_option(spec))
            .collect()
    }

    fn run<T: SweepTarget + ?Sized>(
        &self,
        target: &T,
        name: String,
        summaries: Vec<OptionSummary>,
    ) -> BsmResult<AnalysisReport<T::Output>> {
        let valuation = target.evaluate_scenario(&Default::default())?;
        let spot = target.reference_price();
        let s = &self.settings;

        let time_decay = time_decay(target, s.time_points)?;
        let price_scenarios = price_scenarios(target, s.price_range(spot), s.price_scenarios.num_points)?;
        let volatility_scenarios = volatility_scenarios(
            target,
            (s.volatility_scenarios.min_vol, s.volatility_scenarios.max_vol),
            s.volatility_scenarios.num_points,
        )?;

        tracing::info!(
            %name,
            price = valuation.price(),
            time_points = time_decay.len(),
            price_points = price_scenarios.len(),
            vol_points = volatility_scenarios.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            name,
            valuation,
            summaries,
            time_decay,
            price_scenarios,
            volatility_scenarios,
        })
    }
}
