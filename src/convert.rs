//! Builders that turn TOML sections into crate-level configs.

use anyhow::{bail, Result};

use helios_forecast::{ForecastConfig, GrowthBaseline};
use helios_select::OrderBounds;
use helios_train::SplitSpec;

use crate::config::{ForecastToml, SelectionToml, TrainToml};

/// Build order-search bounds from the `[selection]` section.
pub fn build_order_bounds(toml: &SelectionToml) -> OrderBounds {
    OrderBounds {
        max_p: toml.max_p,
        max_q: toml.max_q,
        max_d: toml.max_d,
    }
}

/// Build the split discipline from the `[train]` section, with an
/// optional CLI override for the ratio.
pub fn build_split_spec(toml: &TrainToml, ratio_override: Option<f64>) -> SplitSpec {
    SplitSpec {
        ratio: ratio_override.unwrap_or(toml.split_ratio),
        min_train: toml.min_train,
        min_test: toml.min_test,
    }
}

/// Build the serving config from the `[forecast]` section.
pub fn build_forecast_config(toml: &ForecastToml) -> Result<ForecastConfig> {
    let baseline = match toml.baseline.as_str() {
        "historical" => GrowthBaseline::HistoricalAverage,
        "fixed" => GrowthBaseline::Fixed(toml.fixed_growth),
        other => bail!("unknown [forecast].baseline '{other}' (expected 'historical' or 'fixed')"),
    };
    if !(toml.confidence_level > 0.0 && toml.confidence_level < 1.0) {
        bail!(
            "[forecast].confidence_level must be in (0, 1), got {}",
            toml.confidence_level
        );
    }
    Ok(ForecastConfig {
        baseline,
        scenario_delta: toml.scenario_delta,
        confidence_level: toml.confidence_level,
        max_horizon: toml.max_horizon,
    })
}
