//! Configuration files
//!
//! A configuration lists one or more options and, optionally, the sweep
//! settings to analyze them with. JSON and YAML are both accepted; the format
//! is chosen by file extension.
//!
//! ```yaml
//! configurations:
//!   - ticker: AAPL
//!     current_price: 175.0
//!     strike_price: 180.0
//!     expiration_date: 2025-11-21
//!     option_type: call
//!     implied_volatility: 0.30
//! simulation_settings:
//!   time_points: 30
//! ```

mod option_config;
mod settings;

pub use option_config::*;
pub use settings::*;

use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{BsmError, BsmResult, OptionSpec};
use crate::strategy::Strategy;

/// A full analysis request: options plus sweep settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub configurations: Vec<OptionConfig>,
    #[serde(default)]
    pub simulation_settings: SimulationSettings,
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> BsmResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> BsmResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> BsmResult<Self> {
        let path = path.as_ref();
        let config: Self = read_document(path)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            options = config.configurations.len(),
            "loaded analysis config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> BsmResult<()> {
        if self.configurations.is_empty() {
            return Err(BsmError::config("configurations must list at least one option"));
        }
        for config in &self.configurations {
            config.validate()?;
        }
        self.simulation_settings.validate()
    }

    /// One spec per configured option, as of `valuation_date`
    pub fn to_specs(&self, valuation_date: NaiveDate) -> BsmResult<Vec<OptionSpec>> {
        self.configurations
            .iter()
            .map(|c| c.to_spec(valuation_date))
            .collect()
    }

    /// All configured options as the legs of one strategy
    pub fn to_strategy(&self, valuation_date: NaiveDate) -> BsmResult<Strategy> {
        let legs = self.to_specs(valuation_date)?;
        if legs.is_empty() {
            return Err(BsmError::EmptyStrategy);
        }
        Ok(Strategy::new(legs))
    }
}

/// Deserialize a JSON or YAML file, by extension
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> BsmResult<T> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        Some("yaml") | Some("yml") => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&raw)?)
        }
        _ => Err(BsmError::config(format!(
            "unsupported config format: {} (expected .json, .yaml or .yml)",
            path.display()
        ))),
    }
}
