use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Helios configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeliosConfig {
    /// Input data settings.
    #[serde(default)]
    pub data: DataToml,

    /// Order-selection settings.
    #[serde(default)]
    pub selection: SelectionToml,

    /// Training settings.
    #[serde(default)]
    pub train: TrainToml,

    /// Forecast-serving settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Registry settings.
    #[serde(default)]
    pub registry: RegistryToml,
}

impl HeliosConfig {
    /// Loads and parses the TOML configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    #[serde(default = "default_target_path")]
    pub target: PathBuf,
    #[serde(default = "default_exog_path")]
    pub exogenous: PathBuf,
    #[serde(default = "default_year_column")]
    pub target_year_column: String,
    #[serde(default = "default_target_value_column")]
    pub target_value_column: String,
    #[serde(default = "default_year_column")]
    pub exog_year_column: String,
    #[serde(default = "default_exog_value_column")]
    pub exog_value_column: String,
    #[serde(default = "default_min_years")]
    pub min_years: usize,
}

impl Default for DataToml {
    fn default() -> Self {
        Self {
            target: default_target_path(),
            exogenous: default_exog_path(),
            target_year_column: default_year_column(),
            target_value_column: default_target_value_column(),
            exog_year_column: default_year_column(),
            exog_value_column: default_exog_value_column(),
            min_years: default_min_years(),
        }
    }
}

fn default_target_path() -> PathBuf {
    PathBuf::from("data/energy.csv")
}
fn default_exog_path() -> PathBuf {
    PathBuf::from("data/gdp.csv")
}
fn default_year_column() -> String {
    "year".to_string()
}
fn default_target_value_column() -> String {
    "energy".to_string()
}
fn default_exog_value_column() -> String {
    "gdp".to_string()
}
fn default_min_years() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    #[serde(default = "default_max_p")]
    pub max_p: usize,
    #[serde(default = "default_max_q")]
    pub max_q: usize,
    #[serde(default = "default_max_d")]
    pub max_d: usize,
    /// Fixed differencing order for the automatic search; derived from
    /// the data when unset.
    #[serde(default)]
    pub d: Option<usize>,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            max_p: default_max_p(),
            max_q: default_max_q(),
            max_d: default_max_d(),
            d: None,
        }
    }
}

fn default_max_p() -> usize {
    5
}
fn default_max_q() -> usize {
    5
}
fn default_max_d() -> usize {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainToml {
    #[serde(default = "default_split_ratio")]
    pub split_ratio: f64,
    #[serde(default = "default_min_train")]
    pub min_train: usize,
    #[serde(default = "default_min_test")]
    pub min_test: usize,
    /// Wall-clock budget for one estimation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_horizon_years")]
    pub forecast_horizon_years: u32,
}

impl Default for TrainToml {
    fn default() -> Self {
        Self {
            split_ratio: default_split_ratio(),
            min_train: default_min_train(),
            min_test: default_min_test(),
            timeout_secs: default_timeout_secs(),
            forecast_horizon_years: default_horizon_years(),
        }
    }
}

fn default_split_ratio() -> f64 {
    0.8
}
fn default_min_train() -> usize {
    8
}
fn default_min_test() -> usize {
    2
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_horizon_years() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    /// "historical" (mean growth of the training exog) or "fixed".
    #[serde(default = "default_baseline")]
    pub baseline: String,
    /// Moderate growth rate when `baseline = "fixed"`.
    #[serde(default = "default_fixed_growth")]
    pub fixed_growth: f64,
    #[serde(default = "default_scenario_delta")]
    pub scenario_delta: f64,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_max_horizon")]
    pub max_horizon: usize,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            fixed_growth: default_fixed_growth(),
            scenario_delta: default_scenario_delta(),
            confidence_level: default_confidence_level(),
            max_horizon: default_max_horizon(),
        }
    }
}

fn default_baseline() -> String {
    "historical".to_string()
}
fn default_fixed_growth() -> f64 {
    0.05
}
fn default_scenario_delta() -> f64 {
    0.02
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_max_horizon() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryToml {
    #[serde(default = "default_registry_root")]
    pub root: PathBuf,
}

impl Default for RegistryToml {
    fn default() -> Self {
        Self {
            root: default_registry_root(),
        }
    }
}

fn default_registry_root() -> PathBuf {
    PathBuf::from("registry")
}
