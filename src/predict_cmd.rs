//! Predict command: serve a scenario forecast from the active model.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use helios_forecast::ForecastService;
use helios_registry::Registry;

use crate::cli::PredictArgs;
use crate::config::HeliosConfig;
use crate::convert;

pub fn run(args: PredictArgs) -> Result<()> {
    let _cmd = info_span!("predict").entered();
    let config = HeliosConfig::load(&args.config)?;

    let registry =
        Arc::new(Registry::open(&config.registry.root).context("failed to open registry")?);

    // Horizon: CLI flag, else the active model's configured default, else
    // the training default.
    let horizon = args.years.unwrap_or_else(|| {
        registry
            .get_active()
            .map(|r| r.forecast_horizon_years as usize)
            .unwrap_or(config.train.forecast_horizon_years as usize)
    });

    let service = ForecastService::new(registry, convert::build_forecast_config(&config.forecast)?);
    let forecast = service.predict(args.scenario, horizon)?;
    info!(
        model_id = forecast.model_id,
        scenario = %forecast.scenario,
        horizon,
        "forecast complete"
    );

    println!("{}", serde_json::to_string_pretty(&forecast)?);
    Ok(())
}
